use std::process;

use clap::{Parser, Subcommand};

use rover::Rover;

#[derive(Parser)]
#[command(
    name = "rover",
    version,
    about = "Locate packages and resolve their dependencies"
)]
struct Cli {
    /// Primary search root (default: $ROVER_ROOT)
    #[arg(long, global = true)]
    root: Option<String>,
    /// Secondary search roots, path-separator joined (default: $ROVER_PACKAGE_PATH)
    #[arg(long, global = true)]
    package_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every package with its path
    List,
    /// Print the path of a package
    Find {
        /// Package name
        package: String,
    },
    /// Print the transitive dependencies of a package
    Depends {
        /// Package name
        package: String,
    },
    /// Print the direct dependencies of a package
    Depends1 {
        /// Package name
        package: String,
    },
    /// Show a package's declared dependencies and metadata
    Manifest {
        /// Package name
        package: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let rover = Rover::new(cli.root.as_deref(), cli.package_path.as_deref());

    match cli.command {
        Command::List => cmd_list(&rover),
        Command::Find { package } => cmd_find(&rover, &package),
        Command::Depends { package } => cmd_depends(&rover, &package),
        Command::Depends1 { package } => cmd_depends1(&rover, &package),
        Command::Manifest { package } => cmd_manifest(&rover, &package),
    }
}

fn cmd_list(rover: &Rover) {
    for name in rover.list_packages() {
        match rover.get_path(&name) {
            Ok(path) => println!("{} {}", name, path.display()),
            Err(e) => fail(&e),
        }
    }
}

fn cmd_find(rover: &Rover, package: &str) {
    match rover.get_path(package) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => fail(&e),
    }
}

fn cmd_depends(rover: &Rover, package: &str) {
    match rover.get_depends(package) {
        Ok(deps) => {
            for dep in deps {
                println!("{}", dep);
            }
        }
        Err(e) => fail(&e),
    }
}

fn cmd_depends1(rover: &Rover, package: &str) {
    match rover.get_direct_depends(package) {
        Ok(deps) => {
            for dep in deps {
                println!("{}", dep);
            }
        }
        Err(e) => fail(&e),
    }
}

fn cmd_manifest(rover: &Rover, package: &str) {
    match rover.get_manifest(package) {
        Ok(manifest) => {
            if manifest.depends.is_empty() {
                println!("No dependencies declared.");
            } else {
                println!("Dependencies ({}):", manifest.depends.len());
                for dep in &manifest.depends {
                    println!("  {}", dep);
                }
            }
            if !manifest.metadata.is_empty() {
                println!("Metadata:");
                for (key, value) in &manifest.metadata {
                    println!("  {} = {}", key, value);
                }
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &rover::Error) -> ! {
    eprintln!("error: {}", e);
    process::exit(1);
}
