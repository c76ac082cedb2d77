use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bulkload_uri::{
    add_endpoint_to_url, app::AppConfig, check_that_bucket_has_object_lifecycle_configuration,
    fix_s3_url, get_region_for_redshift_cluster, get_region_for_s3_bucket,
    inspect_bucket_lifecycle, join_urls, make_temp_path, redact_uri, AppBuilder, BucketName,
    StorageClient,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "bulkload-uri")]
#[command(
    about = "Normalize storage URIs and check temp-dir lifecycle policies",
    long_about = None
)]
struct Cli {
    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Join a root URI and a relative path
    Join {
        /// Root URI
        root: String,
        /// Relative path
        path: String,
    },

    /// Rewrite s3a:// and s3n:// to s3://
    Fix {
        /// URI to rewrite
        url: String,
    },

    /// Append an endpoint domain to the bucket host
    AddEndpoint {
        /// URI to rewrite
        url: String,
        /// Endpoint domain (defaults to S3_ENDPOINT_DOMAIN or s3.amazonaws.com)
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Generate a fresh temporary directory under a root
    TempPath {
        /// Root URI
        root: String,
    },

    /// Print a URI with its credentials removed
    Redact {
        /// URI to redact
        uri: String,
    },

    /// Extract the region from a cluster JDBC URL or hostname
    Region {
        /// JDBC URL or hostname
        url: String,
    },

    /// Check that a bucket has a lifecycle rule covering a temp directory
    CheckLifecycle {
        /// Temporary directory URI
        uri: String,
        /// Print the detailed outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up the region a bucket lives in
    BucketRegion {
        /// Bucket name
        bucket: String,
    },

    /// Print a bucket's lifecycle rules as JSON
    LifecycleRules {
        /// Bucket name
        bucket: String,
    },
}

impl Cli {
    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        tracing_subscriber::registry()
            .with(EnvFilter::new(level))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        Ok(())
    }
}

/// Run the commands that need neither configuration nor a storage client.
///
/// Returns `None` for commands that must go through [`run_online`].
fn run_offline(command: &Commands) -> Option<Result<String>> {
    let output = match command {
        Commands::Join { root, path } => Ok(join_urls(root, path)),
        Commands::Fix { url } => Ok(fix_s3_url(url)),
        Commands::AddEndpoint {
            url,
            domain: Some(domain),
        } => add_endpoint_to_url(url, domain).map_err(Into::into),
        Commands::TempPath { root } => Ok(make_temp_path(root)),
        Commands::Redact { uri } => redact_uri(uri).map_err(Into::into),
        Commands::Region { url } => get_region_for_redshift_cluster(url)
            .map(|region| region.to_string())
            .ok_or_else(|| anyhow!("No region found in cluster address")),
        Commands::AddEndpoint { domain: None, .. }
        | Commands::CheckLifecycle { .. }
        | Commands::BucketRegion { .. }
        | Commands::LifecycleRules { .. } => return None,
    };
    Some(output)
}

fn build_client(config: AppConfig) -> Result<Arc<dyn StorageClient>> {
    AppBuilder::new()
        .with_config(config)
        .build()
        .context("Failed to build storage client")
}

async fn run_online(command: Commands) -> Result<String> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    match command {
        Commands::AddEndpoint { url, domain } => {
            let domain = domain.unwrap_or(config.endpoint_domain);
            Ok(add_endpoint_to_url(&url, &domain)?)
        }
        Commands::CheckLifecycle { uri, json } => {
            let client = build_client(config)?;
            if json {
                let check = inspect_bucket_lifecycle(&uri, client.as_ref()).await;
                Ok(serde_json::to_string_pretty(&check)?)
            } else {
                let ok =
                    check_that_bucket_has_object_lifecycle_configuration(&uri, client.as_ref())
                        .await;
                Ok(ok.to_string())
            }
        }
        Commands::BucketRegion { bucket } => {
            let bucket = BucketName::new(bucket).context("Invalid bucket name")?;
            let client = build_client(config)?;
            get_region_for_s3_bucket(&bucket, client.as_ref())
                .await
                .map(|region| region.to_string())
                .ok_or_else(|| anyhow!("Could not determine the region of bucket {}", bucket))
        }
        Commands::LifecycleRules { bucket } => {
            let bucket = BucketName::new(bucket).context("Invalid bucket name")?;
            let client = build_client(config)?;
            let lifecycle = client
                .get_bucket_lifecycle_configuration(&bucket)
                .await
                .with_context(|| format!("Failed to read lifecycle rules of bucket {}", bucket))?;
            Ok(serde_json::to_string_pretty(&lifecycle)?)
        }
        offline => run_offline(&offline)
            .unwrap_or_else(|| Err(anyhow!("Command {:?} has no handler", offline))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    let output = match run_offline(&cli.command) {
        Some(output) => output?,
        None => run_online(cli.command).await?,
    };
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "bulkload-uri",
            "--log-level",
            "debug",
            "join",
            "s3://bucket/root/",
            "/child",
        ]);

        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Join { root, path } => {
                assert_eq!(root, "s3://bucket/root/");
                assert_eq!(path, "/child");
            }
            other => panic!("Expected Join, got {:?}", other),
        }
    }

    #[test]
    fn test_check_lifecycle_flags() {
        let cli = Cli::parse_from(["bulkload-uri", "check-lifecycle", "s3://b/tmp", "--json"]);
        assert!(matches!(
            cli.command,
            Commands::CheckLifecycle { json: true, .. }
        ));
    }

    #[test]
    fn test_offline_commands_skip_configuration() {
        let join = Commands::Join {
            root: "s3://bucket/root/".to_string(),
            path: "child".to_string(),
        };
        assert_eq!(run_offline(&join).unwrap().unwrap(), "s3://bucket/root/child/");

        let region = Commands::Region {
            url: "mycluster.example.com".to_string(),
        };
        assert!(run_offline(&region).unwrap().is_err());

        let explicit = Commands::AddEndpoint {
            url: "s3a://foo/bar".to_string(),
            domain: Some("example.com".to_string()),
        };
        assert_eq!(run_offline(&explicit).unwrap().unwrap(), "s3a://foo.example.com/bar");
    }

    #[test]
    fn test_storage_commands_need_configuration() {
        let defaulted = Commands::AddEndpoint {
            url: "s3a://foo/bar".to_string(),
            domain: None,
        };
        assert!(run_offline(&defaulted).is_none());

        let cli = Cli::parse_from(["bulkload-uri", "lifecycle-rules", "bucket"]);
        assert!(run_offline(&cli.command).is_none());
        assert!(matches!(cli.command, Commands::LifecycleRules { .. }));
    }
}
