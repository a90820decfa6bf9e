//! setup wizard, used when no template is given

use genenv::charset::Charset;
use genenv::config::{Config, DEFAULT_TEMPLATE};
use genenv::interactive::Terminal;
use std::io;

/// Ask for every run setting, `cli` provides the defaults
///
/// The resulting configuration always runs interactively.
pub fn configure(terminal: &mut impl Terminal, cli: &crate::cli::Cli) -> io::Result<Config> {
    terminal.write("Welcome to genenv interactive mode!\nPress Enter to use default values.\n")?;

    let template = ask_or(
        terminal,
        &format!("Enter template file path ({DEFAULT_TEMPLATE}): "),
        DEFAULT_TEMPLATE,
    )?;

    let default_output = cli.output.display().to_string();
    let output = ask_or(
        terminal,
        &format!("Enter output file path ({default_output}): "),
        &default_output,
    )?;

    let length_input =
        terminal.ask(&format!("Enter length for generated values ({}): ", cli.length))?;
    let length = match length_input.trim() {
        "" => cli.length,
        input => match input.parse() {
            Ok(length) => length,
            Err(_) => {
                terminal.write(&format!("Invalid length value, using default: {}\n", cli.length))?;
                cli.length
            }
        },
    };

    let choices = Charset::ALL.map(Charset::as_str).join(", ");
    let default_charset = Charset::from(cli.charset);
    let charset_input = terminal.ask(&format!(
        "Enter charset for generated values ({choices}) [{default_charset}]: "
    ))?;
    let charset = match charset_input.trim() {
        "" => default_charset,
        input => match input.parse::<Charset>() {
            Ok(charset) => charset,
            Err(err) => {
                terminal.write(&format!("{err}, using {default_charset}\n"))?;
                default_charset
            }
        },
    };

    let compare = terminal.confirm("Compare with existing .env file?")?;
    let skip_existing = terminal.confirm("Skip fields that already exist in the .env file?")?;
    let force = terminal.confirm("Force overwrite of existing .env file?")?;

    let config = Config::new(template)
        .output(output)
        .length(length)
        .charset(charset)
        .compare_with_existing(compare)
        .skip_existing(skip_existing)
        .force(force)
        .interactive(true);

    terminal.write(&summary(&config))?;
    Ok(config)
}

fn ask_or(terminal: &mut impl Terminal, prompt: &str, default: &str) -> io::Result<String> {
    let input = terminal.ask(prompt)?;
    let input = input.trim();
    Ok(if input.is_empty() { default } else { input }.to_string())
}

fn summary(config: &Config) -> String {
    format!(
        "\nConfiguration summary:\n\
         Template file: {}\n\
         Output file: {}\n\
         Value length: {}\n\
         Charset: {}\n\
         Compare with existing .env: {}\n\
         Skip existing fields: {}\n\
         Force overwrite: {}\n\n",
        config.template_path().display(),
        config.output_path().display(),
        config.value_length(),
        config.value_charset(),
        config.is_compare_with_existing(),
        config.is_skip_existing(),
        config.is_force(),
    )
}
