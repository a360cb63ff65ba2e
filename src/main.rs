//! Classdex CLI - crawl Java source trees into a SQLite structural catalog

use clap::{Parser, Subcommand};
use classdex::parser::Strategy;
use classdex::storage::SqliteStore;
use classdex::{config, crawler, ignore::IgnoreFilter};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "classdex")]
#[command(version = "0.1.0")]
#[command(about = "Structural catalog extractor for Java codebases")]
#[command(long_about = r#"
Classdex walks a Java project, extracts every class, interface and enum
declaration together with its methods, and stores the catalog in SQLite.

Example usage:
  classdex crawl --path ./my-project
  classdex classes --name "User%"
  classdex methods --class UserService
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a Java project and persist its structural catalog
    Crawl {
        /// Path to the project directory
        #[arg(short, long)]
        path: PathBuf,

        /// Path to the database file (default from config or classdex.db)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Extraction strategy: "ast" (tree-sitter) or "scan" (regex)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// Show row counts for the stored catalog
    Stats {
        /// Path to the database file
        #[arg(short, long, default_value = "classdex.db")]
        database: PathBuf,

        /// Emit JSON instead of text
        #[arg(short, long)]
        json: bool,
    },

    /// List stored classes
    Classes {
        /// Path to the database file
        #[arg(short, long, default_value = "classdex.db")]
        database: PathBuf,

        /// Name pattern (SQL LIKE syntax)
        #[arg(short, long)]
        name: Option<String>,

        /// Restrict to one source file path
        #[arg(short, long)]
        file: Option<String>,

        /// Emit JSON instead of text
        #[arg(short, long)]
        json: bool,
    },

    /// List the methods of a stored class
    Methods {
        /// Path to the database file
        #[arg(short, long, default_value = "classdex.db")]
        database: PathBuf,

        /// Class name
        #[arg(short, long)]
        class: String,
    },

    /// Write a classdex.toml with the given defaults
    Init {
        /// Database file path to record
        #[arg(short, long, default_value = "classdex.db")]
        database: String,

        /// Extraction strategy to record
        #[arg(short, long, default_value = "ast")]
        strategy: String,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Crawl {
            path,
            database,
            strategy,
        } => {
            let file_config = config::load_config(None)?.unwrap_or_default();

            let database = database
                .or_else(|| file_config.database.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("classdex.db"));
            let strategy = strategy
                .or(file_config.strategy)
                .map(|s| Strategy::from_str(&s))
                .transpose()?
                .unwrap_or(Strategy::Ast);

            tracing::info!(
                "Crawling {} into {} ({} strategy)",
                path.display(),
                database.display(),
                strategy
            );

            config::ensure_db_dir(&database)?;
            let store = SqliteStore::open(&database)?;
            let parser = strategy.create_parser()?;
            let filter = IgnoreFilter::new(&path, file_config.exclude.as_deref());

            let stats = crawler::crawl(&path, &store, parser.as_ref(), &filter)?;
            println!("Crawl complete: {}", stats);
            println!("Database saved to {}", database.display());
        }

        Commands::Stats { database, json } => {
            let store = SqliteStore::open(&database)?;
            let stats = store.stats()?;
            if json {
                let data = serde_json::json!({
                    "classes": stats.classes,
                    "methods": stats.methods,
                    "files": stats.files,
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!("{}", stats);
            }
        }

        Commands::Classes {
            database,
            name,
            file,
            json,
        } => {
            let store = SqliteStore::open(&database)?;
            let classes = if let Some(file) = file {
                store.classes_in_file(&file)?
            } else {
                store.find_classes_by_name(name.as_deref().unwrap_or("%"))?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&classes)?);
            } else if classes.is_empty() {
                println!("No classes found.");
            } else {
                for class in classes {
                    print!("- [{}] {} ({}:{})", class.kind, class.name, class.path, class.line);
                    if let Some(superclass) = &class.superclass {
                        print!(" extends {}", superclass);
                    }
                    if let Some(column) = class.interfaces_column() {
                        print!(" implements {}", column);
                    }
                    println!();
                }
            }
        }

        Commands::Methods { database, class } => {
            let store = SqliteStore::open(&database)?;
            let classes = store.find_classes_by_name(&class)?;

            if classes.is_empty() {
                println!("No class named '{}' found.", class);
            } else {
                for class in classes {
                    println!("{} ({}:{})", class.name, class.path, class.line);
                    let Some(id) = class.id else { continue };
                    for method in store.methods_for_class(id)? {
                        let visibility = method
                            .visibility
                            .map(|v| v.as_str())
                            .unwrap_or("package-private");
                        println!(
                            "  - {} {}{}() -> {} (line {})",
                            visibility,
                            if method.is_static { "static " } else { "" },
                            method.name,
                            method.return_type.as_deref().unwrap_or("?"),
                            method.line
                        );
                    }
                }
            }
        }

        Commands::Init {
            database,
            strategy,
            force,
        } => {
            // Validate before writing
            Strategy::from_str(&strategy)?;
            let config_path = config::default_config_path();
            let file_config = config::ClassdexConfig {
                database: Some(database),
                strategy: Some(strategy),
                exclude: None,
            };
            config::write_config(&config_path, &file_config, force)?;
            println!("Wrote {}", config_path.display());
        }
    }

    Ok(())
}
