use rabe_bn::Gt;
use serde::{Deserialize, Serialize};

use crate::abe_attribute::AttributeUniverse;
use crate::models::{AbeCiphertext, IbeCiphertext, IbePublicParams, IbeSealedMessage};

/// Output of one IBE encrypt / decrypt run.
#[derive(Debug, Serialize, Deserialize)]
pub struct IbeReport {
    pub identity: String,
    pub public_params: IbePublicParams,
    pub ciphertext: IbeCiphertext,
    pub tampered: bool,
    pub outcome: DecryptionOutcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IbeSealReport {
    pub identity: String,
    pub sealed: IbeSealedMessage,
    pub outcome: DecryptionOutcome,
}

/// Output of one ABE encrypt / decrypt run.
#[derive(Debug, Serialize, Deserialize)]
pub struct AbeReport {
    pub universe: AttributeUniverse,
    pub threshold: usize,
    pub holder: Vec<String>,
    pub required: Vec<String>,
    pub overlap: Vec<String>,
    pub message: Gt,
    pub ciphertext: AbeCiphertext,
    pub recovered: Option<Gt>,
    pub consistent: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecryptionOutcome {
    Decrypted { message: String },
    Rejected { reason: String },
}
