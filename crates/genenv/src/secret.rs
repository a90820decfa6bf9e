//! secure random values
//!
//! Each random byte selects `alphabet[byte % alphabet.len()]`. For alphabets whose size does
//! not divide 256 (62 and 52 characters) this skews slightly towards the first characters.
//! The skew is known and accepted; length and charset membership are exact.
use crate::charset::Charset;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct SecretGenerator {
    length: usize,
    charset: Charset,
}

impl SecretGenerator {
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Draw a value from the operating system's secure random source
    pub fn generate(&self) -> Result<String, RandomSourceError> {
        self.generate_with(&mut rand::rngs::OsRng)
    }

    pub fn generate_with(&self, rng: &mut dyn RngCore) -> Result<String, RandomSourceError> {
        let alphabet = self.charset.alphabet().as_bytes();

        let mut bytes = vec![0u8; self.length];
        rng.try_fill_bytes(&mut bytes)?;

        Ok(bytes
            .into_iter()
            .map(|byte| char::from(alphabet[usize::from(byte) % alphabet.len()]))
            .collect())
    }
}

#[derive(thiserror::Error, Debug)]
#[error("secure random source unavailable")]
pub struct RandomSourceError(#[from] rand::Error);
