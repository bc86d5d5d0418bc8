use clap::Parser;
use mdf_feedstock::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    match commands::run(&args) {
        Ok(true) => process::exit(0),
        Ok(false) => {
            // No subcommand was provided
            show_help_and_commands();
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("MDF Feedstock - gdb8-15 Electronic Spectra Converter");
    println!("====================================================");
    println!();
    println!("Convert the gdb8-15 electronic spectra table into validated");
    println!("Materials Data Facility feedstock (newline-delimited JSON).");
    println!();
    println!("USAGE:");
    println!("    mdf-feedstock <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert              Convert the spectra table into a feedstock (main command)");
    println!("    validate-metadata    Check dataset metadata against the dataset schema");
    println!("    help                 Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert with the default layout (datasets/gdb8-15, feedstock/):");
    println!("    mdf-feedstock convert");
    println!();
    println!("    # Convert with custom paths and metadata:");
    println!("    mdf-feedstock convert --input /data/gdb8-15 --output out/gdb8-15_all.json \\");
    println!("                          --composition-feedstock out/gdb9-14_all.json \\");
    println!("                          --metadata metadata.json");
    println!();
    println!("    # Split columns on any run of whitespace:");
    println!("    mdf-feedstock convert --separator whitespace");
    println!();
    println!("    # Check a metadata document before converting:");
    println!("    mdf-feedstock validate-metadata metadata.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    mdf-feedstock <COMMAND> --help");
}
