mod cli;
mod wizard;

use genenv::config::Config;
use genenv::generator::{Generator, Report};
use genenv::interactive::{Prompter, Stdio, Terminal};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("GENENV_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match &cli.command {
        Some(cli::Command::Inspect(inspect_cli)) => inspect(inspect_cli),
        None => generate(&cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn generate(cli: &cli::Cli) -> anyhow::Result<()> {
    let mut terminal = Stdio;
    let (config, confirmed) = configure(cli, &mut terminal)?;

    if config.is_force() && !confirmed && config.output_path().exists() {
        let question = format!(
            "File {} already exists. Regenerate values?",
            config.output_path().display()
        );
        if !terminal.confirm(&question)? {
            println!("Operation cancelled");
            return Ok(());
        }
    }

    let compare = config.is_compare_with_existing();
    let mut generator = Generator::new(config);
    let report = if generator.config().is_interactive() {
        let mut prompter = Prompter::new(terminal, compare)?;
        generator.run_with(Some(&mut prompter))?
    } else {
        generator.run()?
    };

    print_report(&report);
    Ok(())
}

/// Run configuration and whether regenerating an existing output is already confirmed
fn configure(cli: &cli::Cli, terminal: &mut impl Terminal) -> std::io::Result<(Config, bool)> {
    let Some(template) = cli.template() else {
        // the wizard asks about overwriting itself
        return Ok((wizard::configure(terminal, cli)?, true));
    };

    let config = Config::new(template)
        .output(&cli.output)
        .force(cli.force)
        .length(cli.length)
        .charset(cli.charset.into())
        .interactive(cli.interactive)
        .compare_with_existing(cli.compare)
        .skip_existing(cli.skip_existing);

    Ok((config, cli.yes))
}

fn print_report(report: &Report) {
    println!(
        "Successfully generated {} from {}",
        report.output.display(),
        report.template.display()
    );
    if !report.missing.is_empty() {
        println!(
            "Keys not present in the existing {}: {}",
            report.output.display(),
            report.missing.join(", ")
        );
    }
    for name in &report.unresolved {
        eprintln!(
            "warning: no value could be generated for ${{{name}}}, placeholder left in place"
        );
    }
}

/// Print the field metadata of a template
///
/// A quick way to check how annotations are understood
pub fn inspect(cli: &cli::InspectCommand) -> anyhow::Result<()> {
    let template = genenv::reconcile::Template::load(&cli.template)?;

    match cli.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), template.metadata())?,
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), template.metadata())?
        }
    };

    Ok(())
}
