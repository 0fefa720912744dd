use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bview",
    about = "bview: browse and edit an embedded bucket store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (defaults to the config value, then `bview.redb`)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List bucket names
    Buckets,
    /// Print one record
    Get(KeyArgs),
    /// Print every record of a bucket
    All(BucketArgs),
    /// Store a value under a key
    Set(SetArgs),
    /// Store a value under a generated key
    Insert(InsertArgs),
    /// Delete a record
    Delete(KeyArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct BucketArgs {
    pub bucket: String,
}

#[derive(Args)]
pub struct KeyArgs {
    pub bucket: String,
    pub key: String,
}

#[derive(Args)]
pub struct SetArgs {
    pub bucket: String,
    pub key: String,
    pub value: String,
}

#[derive(Args)]
pub struct InsertArgs {
    pub bucket: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["bview", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert!(args.config.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_rejects_bad_addr() {
        assert!(Cli::try_parse_from(["bview", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn parse_serve_config() {
        let cli = Cli::try_parse_from(["bview", "serve", "-c", "bview.toml"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("bview.toml")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_get() {
        let cli = Cli::try_parse_from(["bview", "get", "users", "u1"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.bucket, "users");
            assert_eq!(args.key, "u1");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_set() {
        let cli = Cli::try_parse_from(["bview", "set", "users", "u1", r#"{"name":"Ann"}"#]).unwrap();
        if let Command::Set(args) = cli.command {
            assert_eq!(args.value, r#"{"name":"Ann"}"#);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_insert() {
        let cli = Cli::try_parse_from(["bview", "insert", "notes", "hello"]).unwrap();
        assert!(matches!(cli.command, Command::Insert(_)));
    }

    #[test]
    fn parse_delete_requires_key() {
        assert!(Cli::try_parse_from(["bview", "delete", "users"]).is_err());
    }

    #[test]
    fn parse_global_db() {
        let cli = Cli::try_parse_from(["bview", "buckets", "--db", "/tmp/x.redb"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.redb")));
        assert!(matches!(cli.command, Command::Buckets));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["bview", "--verbose", "buckets"]).unwrap();
        assert!(cli.verbose);
    }
}
