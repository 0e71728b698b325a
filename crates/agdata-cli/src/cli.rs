use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "agdata",
    about = "AgData record API — named records over HTTP, stored in SQLite",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML config file
    #[arg(short, long, global = true, env = "AGDATA_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Create the database and its schema if missing
    InitDb(DbArgs),
    /// Print the resolved configuration
    Config,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "AGDATA_BIND")]
    pub bind: Option<SocketAddr>,
    #[command(flatten)]
    pub db: DbArgs,
}

#[derive(Args, Debug)]
pub struct DbArgs {
    /// SQLite database file
    #[arg(long, env = "AGDATA_DB")]
    pub db: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "agdata", "serve", "--bind", "0.0.0.0:8080", "--db", "/tmp/r.db",
        ])
        .unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.unwrap().port(), 8080);
        assert_eq!(args.db.db.unwrap(), PathBuf::from("/tmp/r.db"));
    }

    #[test]
    fn parse_global_config() {
        let cli = Cli::try_parse_from(["agdata", "config", "--config", "agdata.toml", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.unwrap(), PathBuf::from("agdata.toml"));
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        assert!(Cli::try_parse_from(["agdata", "serve", "--bind", "nowhere"]).is_err());
    }
}
