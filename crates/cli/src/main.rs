use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use hcert_core::config::{accepted_proofs_from_env_value, target_from_env_value};
use hcert_core::{
    CoverageConfig, CoverageService, FileTrustStore, HealthCertificate, NonEmptyText, ProofKinds,
    TrustStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hcert")]
#[command(about = "Check coverage of decoded EU digital COVID certificates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a decoded claim map
    Check {
        /// JSON file holding the decoded CWT claim map
        claims: PathBuf,
        /// Disease target code (defaults to HCERT_TARGET, then COVID-19)
        #[arg(long)]
        target: Option<NonEmptyText>,
        /// Accepted proof kinds, comma separated (defaults to HCERT_ACCEPTED_PROOFS, then all)
        #[arg(long)]
        accept: Option<String>,
        /// Only report vaccination as the proof type for a complete series
        #[arg(long)]
        fully_vaccinated_only: bool,
        /// Evaluation instant (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// List trust anchors from a JSON trust list
    Anchors {
        /// Trust list file (defaults to HCERT_TRUST_LIST)
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("hcert=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            claims,
            target,
            accept,
            fully_vaccinated_only,
            at,
        } => {
            let target = match target {
                Some(target) => target.into_inner(),
                None => target_from_env_value(std::env::var("HCERT_TARGET").ok()),
            };
            let accepted: ProofKinds = accepted_proofs_from_env_value(
                accept.or_else(|| std::env::var("HCERT_ACCEPTED_PROOFS").ok()),
            )?;
            let cfg = CoverageConfig::new(target, accepted, fully_vaccinated_only)?;
            let service = CoverageService::new(Arc::new(cfg));

            let text = std::fs::read_to_string(&claims)
                .with_context(|| format!("failed to read {}", claims.display()))?;
            let certificate = HealthCertificate::parse_hcert_v1_json(&text)?;

            let now = at.unwrap_or_else(Utc::now);
            let decision = service.evaluate(&certificate, now);
            tracing::info!(
                "evaluated {} at {}: covered={}",
                claims.display(),
                now.to_rfc3339(),
                decision.covered
            );
            let subject = certificate.subject();

            println!("Issuer: {}", certificate.issuer());
            println!(
                "Subject: {} {}, born {}",
                subject.first_name(),
                subject.last_name(),
                subject.formatted_date_of_birth()
            );
            println!("Proof type: {}", decision.proof_type);
            println!(
                "Covered for {}: {}",
                service.config().target(),
                if decision.covered { "yes" } else { "no" }
            );
            match decision.expires_at {
                Some(expires_at) => println!("Coverage expires: {}", expires_at.to_rfc3339()),
                None => println!("Coverage expires: -"),
            }
            if certificate.is_expired_at(now) {
                println!("Certificate expired");
            }
        }
        Commands::Anchors { path } => {
            let path = match path {
                Some(path) => path,
                None => std::env::var("HCERT_TRUST_LIST")
                    .map(PathBuf::from)
                    .context("no trust list given and HCERT_TRUST_LIST is not set")?,
            };

            let store = FileTrustStore::new(path);
            let anchors = store.fetch_trust_anchors()?;
            tracing::info!(
                "{} trust anchors in {}",
                anchors.len(),
                store.path().display()
            );
            if anchors.is_empty() {
                println!("No trust anchors found.");
            } else {
                for anchor in anchors {
                    println!(
                        "{} {} {} {}",
                        anchor.country(),
                        anchor.kid(),
                        anchor.certificate_type(),
                        anchor.timestamp().to_rfc3339()
                    );
                }
            }
        }
    }

    Ok(())
}
