//! `toolbelt b64` – base64 encode/decode.

use anyhow::Result;
use toolbelt_core::strings::{b64_decode_to_str, b64_encode_from_str};

use crate::cli::B64Command;

pub fn run_b64(action: B64Command) -> Result<()> {
    match action {
        B64Command::Encode { text, standard } => {
            println!("{}", b64_encode_from_str(&text, !standard));
        }
        B64Command::Decode { text } => {
            println!("{}", b64_decode_to_str(text.trim())?);
        }
    }
    Ok(())
}
