//! Send a raw report and print what comes back

use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use kontrol_transport::printer::tag_name;
use kontrol_transport::protocol::REPORT_READ_SIZE;
use kontrol_transport::{hex_string, PrinterConfig};

use super::{open_transport, CommandResult};

/// Polls made for a reply after sending
const REPLY_POLLS: usize = 10;

/// Parse hex bytes, ignoring whitespace and an optional 0x prefix
pub fn parse_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    let digits: String = input
        .split_whitespace()
        .map(|s| s.trim_start_matches("0x"))
        .collect();
    if digits.is_empty() {
        bail!("No bytes given");
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        bail!("Invalid hex digit {:?}", bad);
    }
    if digits.len() % 2 != 0 {
        bail!("Odd number of hex digits");
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).context("Invalid hex byte")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("Invalid hex byte {:?}", pair))
        })
        .collect()
}

pub fn raw(hex: &str, printer_config: Option<PrinterConfig>) -> CommandResult {
    let data = parse_hex(hex)?;
    let transport = open_transport(printer_config)?;

    println!(
        "Sending {} ({} bytes)...",
        tag_name(data[0]),
        data.len()
    );
    transport.send_report(&data)?;

    for _ in 0..REPLY_POLLS {
        if let Some(reply) = transport.poll_report(REPORT_READ_SIZE)? {
            println!("Received ({} bytes): {}", reply.len(), hex_string(&reply));
            return Ok(());
        }
        thread::sleep(Duration::from_millis(10));
    }
    println!("No report received");
    Ok(())
}
