//! `lawbot get`: print one case by its corpus position.

use anyhow::{bail, Result};

use crate::service::CaseService;

pub fn run_get(service: &CaseService, index: usize) -> Result<()> {
    match service.get(index) {
        Some(case) => {
            println!("{}", serde_json::to_string_pretty(case)?);
            Ok(())
        }
        None => bail!(
            "case not found: {} (corpus has {} cases)",
            index,
            service.len()
        ),
    }
}
