//! Command line driver for the IBE and threshold ABE schemes.
//!
//! Every subcommand runs a full setup / extract / encrypt / decrypt round in memory and
//! prints a JSON report.

use std::error::Error;
use std::fs;

use ark_ec::{AffineRepr, CurveGroup};
use clap::{Parser, Subcommand};
use rand::Rng;
use tracing::info;

use pkg_crypto::abe::AbePkg;
use pkg_crypto::abe_attribute::AttributeUniverse;
use pkg_crypto::api::api_models::{AbeReport, DecryptionOutcome, IbeReport, IbeSealReport};
use pkg_crypto::bn254::G2Affine;
use pkg_crypto::config::{AbeSettings, DEFAULT_SECURITY_BITS};
use pkg_crypto::errors::{ConfigurationError, DecryptionError};
use pkg_crypto::hybrid::{ibe_open, ibe_seal};
use pkg_crypto::ibe::IbePkg;

#[derive(Parser)]
#[command(name = "pkg-crypto")]
#[command(about = "Identity based and threshold attribute based encryption demo")]
struct Cli {
    /// Log filter, e.g. `info` or `pkg_crypto=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a short message to an identity and decrypt it again
    Ibe {
        #[arg(long)]
        identity: String,

        #[arg(long)]
        message: String,

        #[arg(long, default_value_t = DEFAULT_SECURITY_BITS)]
        security_bits: usize,

        /// Modify U before decrypting, the integrity check must reject it
        #[arg(long)]
        tamper: bool,
    },

    /// Seal a message of any length to an identity (IBE + AES-256-GCM)
    IbeSeal {
        #[arg(long)]
        identity: String,

        #[arg(long)]
        message: String,

        #[arg(long, default_value_t = DEFAULT_SECURITY_BITS)]
        security_bits: usize,
    },

    /// Encrypt a random group element under attributes and decrypt it as a holder
    Abe {
        /// JSON file with `universe` and `threshold`
        #[arg(long, conflicts_with_all = ["universe", "threshold"])]
        config: Option<String>,

        /// Comma separated attribute universe
        #[arg(long, value_delimiter = ',')]
        universe: Vec<String>,

        #[arg(long)]
        threshold: Option<usize>,

        /// Attributes of the decrypting party
        #[arg(long, value_delimiter = ',', required = true)]
        holder: Vec<String>,

        /// Attributes the message is encrypted under, the whole universe if omitted
        #[arg(long, value_delimiter = ',')]
        required: Vec<String>,
    },

    /// Print the published form of an attribute universe
    Universe {
        #[arg(long, value_delimiter = ',', required = true)]
        universe: Vec<String>,

        #[arg(long, default_value_t = AttributeUniverse::INITIAL_VERSION)]
        version: u32,
    },
}

fn outcome(result: Result<Vec<u8>, DecryptionError>) -> DecryptionOutcome {
    match result {
        Ok(message) => DecryptionOutcome::Decrypted {
            message: String::from_utf8_lossy(&message).to_string(),
        },
        Err(e) => DecryptionOutcome::Rejected {
            reason: e.to_string(),
        },
    }
}

fn run_ibe(
    identity: String,
    message: String,
    security_bits: usize,
    tamper: bool,
) -> Result<IbeReport, Box<dyn Error>> {
    let rng = &mut rand::thread_rng();
    let pkg = IbePkg::setup(security_bits, rng)?;
    let private_key = pkg.extract(&identity)?;

    let mut ciphertext = pkg.encrypt(message.as_bytes(), &identity, rng)?;
    if tamper {
        ciphertext.u = (ciphertext.u + G2Affine::generator()).into_affine();
    }

    let result = pkg.decrypt(&ciphertext, &private_key);
    info!(identity = %identity, ok = result.is_ok(), "ibe round complete");

    Ok(IbeReport {
        identity,
        public_params: pkg.params().clone(),
        ciphertext,
        tampered: tamper,
        outcome: outcome(result),
    })
}

fn run_ibe_seal(
    identity: String,
    message: String,
    security_bits: usize,
) -> Result<IbeSealReport, Box<dyn Error>> {
    let rng = &mut rand::thread_rng();
    let pkg = IbePkg::setup(security_bits, rng)?;
    let private_key = pkg.extract(&identity)?;

    let sealed = ibe_seal(pkg.params(), &identity, message.as_bytes(), rng)?;
    let result = ibe_open(pkg.params(), &sealed, &private_key);

    Ok(IbeSealReport {
        identity,
        sealed,
        outcome: outcome(result),
    })
}

fn run_abe(
    config: Option<String>,
    universe: Vec<String>,
    threshold: Option<usize>,
    holder: Vec<String>,
    required: Vec<String>,
) -> Result<AbeReport, Box<dyn Error>> {
    let settings = match config {
        Some(path) => AbeSettings::from_json(&fs::read_to_string(path)?)?,
        None => {
            let threshold = threshold.ok_or(ConfigurationError::new(
                "Either --config or --universe with --threshold is required",
            ))?;
            AbeSettings::new(AttributeUniverse::new(&universe)?, threshold)?
        }
    };

    let rng = &mut rand::thread_rng();
    let pkg = AbePkg::from_settings(settings, rng)?;

    let required = if required.is_empty() {
        pkg.universe()
            .attributes()
            .iter()
            .map(|a| a.name.clone())
            .collect()
    } else {
        required
    };

    let private_key = pkg.extract(&holder, rng)?;
    let message = rng.gen();
    let ciphertext = pkg.encrypt(&message, &required, rng)?;

    let overlap = pkg
        .params()
        .overlap(&ciphertext, &holder)?
        .into_iter()
        .filter_map(|i| pkg.universe().name_of(i).map(|n| n.to_string()))
        .collect();

    let result = pkg.decrypt(&ciphertext, &private_key, &holder);
    info!(threshold = pkg.threshold(), ok = result.is_ok(), "abe round complete");

    let (recovered, error) = match result {
        Ok(recovered) => (Some(recovered), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Ok(AbeReport {
        universe: pkg.universe().clone(),
        threshold: pkg.threshold(),
        holder,
        required,
        overlap,
        message,
        ciphertext,
        consistent: recovered == Some(message),
        recovered,
        error,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&cli.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    let report = match cli.command {
        Commands::Ibe {
            identity,
            message,
            security_bits,
            tamper,
        } => serde_json::to_string_pretty(&run_ibe(identity, message, security_bits, tamper)?)?,
        Commands::IbeSeal {
            identity,
            message,
            security_bits,
        } => serde_json::to_string_pretty(&run_ibe_seal(identity, message, security_bits)?)?,
        Commands::Abe {
            config,
            universe,
            threshold,
            holder,
            required,
        } => serde_json::to_string_pretty(&run_abe(config, universe, threshold, holder, required)?)?,
        Commands::Universe { universe, version } => {
            serde_json::to_string_pretty(&AttributeUniverse::with_version(&universe, version)?)?
        }
    };

    println!("{}", report);
    Ok(())
}
