use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use flixmate_qa::{report, runner, utils};

#[derive(Parser)]
#[command(name = "flixmate-qa")]
#[command(version)]
#[command(about = "CRUD smoke verification and test report generation for FlixMate", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the CRUD persistence check against a running server
    Verify {
        /// API base URL (default http://localhost:8080/api)
        #[arg(long)]
        base_url: Option<String>,

        /// Admin email
        #[arg(long)]
        email: Option<String>,

        /// Admin password
        #[arg(long)]
        password: Option<String>,

        /// Do not wait for Enter before starting
        #[arg(short, long, default_value = "false")]
        yes: bool,

        /// Also write step results as JUnit XML
        #[arg(long)]
        junit: Option<PathBuf>,
    },

    /// Build the HTML/JSON report from Surefire results
    Report {
        /// Directory containing TEST-*.xml files
        #[arg(long)]
        results_dir: Option<PathBuf>,

        /// Directory for the generated files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    utils::logging::init();

    let mut config = utils::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Verify {
            base_url,
            email,
            password,
            yes,
            junit,
        } => {
            let verify = &mut config.verify;
            if let Some(url) = base_url {
                verify.base_url = url;
            }
            if let Some(email) = email {
                verify.admin_email = email;
            }
            if let Some(password) = password {
                verify.admin_password = password;
            }

            println!("{}", "FlixMate Data Persistence Test".bold().green());
            println!("====================================");
            println!();
            println!("This will test CRUD operations to ensure data persistence works correctly.");
            println!(
                "Make sure the FlixMate application is running on {}",
                verify.api_root().cyan()
            );
            println!();

            if !yes {
                print!("Press Enter to start the tests...");
                io::stdout().flush()?;
                let mut input = String::new();
                io::stdin().read_line(&mut input)?;
                println!();
            }

            let run = runner::run_verification(verify).await?;
            runner::print_summary(&run);

            if let Some(path) = junit {
                report::junit::write_report(&run, &path)?;
                println!("  JUnit report: {}", path.display().to_string().cyan());
            }

            println!();
            if run.is_success() {
                println!(
                    "{} All tests passed! Your data persistence is working correctly.",
                    "✅".green()
                );
                Ok(ExitCode::SUCCESS)
            } else {
                println!(
                    "{} Some tests failed. Please check the output above for details.",
                    "❌".red()
                );
                println!();
                println!("Common issues and solutions:");
                println!("1. Make sure the Spring Boot application is running");
                println!("2. Verify database connection settings");
                println!("3. Check if @Transactional annotations are present in service classes");
                println!("4. Ensure proper admin user credentials");
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::Report {
            results_dir,
            output_dir,
        } => {
            if let Some(dir) = results_dir {
                config.report.results_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.report.output_dir = dir;
            }

            println!(
                "{} Generating FlixMate CRUD Test Report...",
                "📊".to_string().blue()
            );
            let generated = report::generate_report(&config.report)?;
            report::print_summary(&generated.document);
            Ok(ExitCode::SUCCESS)
        }
    }
}
