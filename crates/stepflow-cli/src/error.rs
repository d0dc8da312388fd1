use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{err:#}").to_lowercase();

    if msg.contains("failed to read responses") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Pass a file of model responses separated by '---' lines:");
        eprintln!(
            "  {} stepflow run --question \"...\" --responses script.txt",
            "$".dimmed()
        );
    }

    if msg.contains("invalid config file") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the [engine] and [logging] sections of your config file.");
    }

    if msg.contains("max_iterations") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Set max_iterations to at least 1.");
    }

    std::process::exit(1);
}
