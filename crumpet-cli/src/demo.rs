//! The built-in closure-record demonstration.
//!
//! Builds the canonical chain in memory: an identity record is wrapped in
//! a forwarding record, and the wrapper is invoked with the identity
//! record as its argument. The chain resolves back to the identity record
//! and the process exits successfully, without producing any output.

use crumpet::lang::record::{Code, Records};

pub fn run() -> anyhow::Result<()> {
    let mut records = Records::new();

    let base = records.alloc(Code::Identity, &[])?;
    let wrapped = records.wrap(base)?;
    let result = records.invoke(wrapped, &[base])?;

    log::debug!("demonstration chain resolved to {:?}", result);

    Ok(())
}
