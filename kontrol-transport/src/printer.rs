//! PrinterTransport middleware for monitoring/tracing transport operations
//!
//! This module provides a middleware that wraps any Transport implementation
//! and prints every frame passing through it: outgoing reports, bulk pushes
//! and incoming reports.
//!
//! # Example
//!
//! ```ignore
//! use kontrol_transport::{HidDiscovery, PrinterConfig};
//!
//! let discovery = HidDiscovery::with_printer_config(PrinterConfig::default());
//! let transport = discovery.probe()?;
//! // Now all frames will be printed
//! ```

use std::str::FromStr;

use crossterm::style::Stylize;
use serde::Serialize;

use crate::event_parser::parse_report;
use crate::types::InputReport;
use crate::{Transport, TransportDeviceInfo, TransportError};

/// Output format for the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Frame filter for selective display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PacketFilter {
    #[default]
    All,
    /// Inbound reports only
    Input,
    /// Outbound reports and bulk pushes only
    Output,
    /// One outbound frame tag
    Tag(u8),
}

impl FromStr for PacketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "input" | "in" => Ok(Self::Input),
            "output" | "out" => Ok(Self::Output),
            s if s.starts_with("tag=") || s.starts_with("0x") => {
                let hex_str = s.strip_prefix("tag=").unwrap_or(s);
                let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
                u8::from_str_radix(hex_str, 16)
                    .map(Self::Tag)
                    .map_err(|e| format!("Invalid frame tag: {}", e))
            }
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Configuration for the PrinterTransport
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Show raw hex dump alongside decoded output
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: PacketFilter,
    /// Output format
    pub format: OutputFormat,
}

impl PrinterConfig {
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    pub fn with_filter(mut self, filter: PacketFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Human-readable name for an outbound frame tag
pub fn tag_name(tag: u8) -> &'static str {
    match tag {
        0x80 => "BUTTON_LIGHTS",
        0x84 => "BITMAP",
        0xA1 => "KNOBS_BUTTONS",
        0xA2 => "SLIDERS",
        0xA3 => "PEDAL_PARAMS",
        0xA4 => "KEY_ZONES",
        0xF4 => "PEDAL_PORT",
        _ => "UNKNOWN",
    }
}

/// One printed frame in JSON mode
#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    direction: &'static str,
    channel: &'static str,
    name: &'a str,
    len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    hex: Option<String>,
}

/// Space-separated lowercase hex
pub fn hex_string(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transport middleware that prints all frames
pub struct PrinterTransport {
    inner: Box<dyn Transport>,
    config: PrinterConfig,
}

impl PrinterTransport {
    /// Wrap a transport with printing middleware
    pub fn wrap(transport: Box<dyn Transport>, config: PrinterConfig) -> Box<dyn Transport> {
        Box::new(Self {
            inner: transport,
            config,
        })
    }

    fn should_show_output(&self, tag: Option<u8>) -> bool {
        match &self.config.filter {
            PacketFilter::All | PacketFilter::Output => true,
            PacketFilter::Input => false,
            PacketFilter::Tag(t) => tag == Some(*t),
        }
    }

    fn should_show_input(&self) -> bool {
        matches!(&self.config.filter, PacketFilter::All | PacketFilter::Input)
    }

    fn emit_json(&self, direction: &'static str, channel: &'static str, name: &str, data: &[u8]) {
        let record = FrameRecord {
            direction,
            channel,
            name,
            len: data.len(),
            hex: self.config.show_hex.then(|| hex_string(data)),
        };
        match serde_json::to_string(&record) {
            Ok(line) => eprintln!("{}", line),
            Err(e) => tracing::warn!("Failed to serialize frame record: {}", e),
        }
    }

    fn print_output(&self, channel: &'static str, data: &[u8]) {
        let tag = data.first().copied();
        if !self.should_show_output(tag) {
            return;
        }
        let name = tag.map(tag_name).unwrap_or("EMPTY");

        match self.config.format {
            OutputFormat::Json => self.emit_json("out", channel, name, data),
            OutputFormat::Text => {
                eprintln!(
                    "{} {}  0x{:02x} {} ({} bytes)",
                    ">>>".cyan(),
                    channel.to_uppercase().cyan().bold(),
                    tag.unwrap_or(0),
                    name.yellow(),
                    data.len()
                );
                if self.config.show_hex {
                    eprintln!("    {}  {}", "HEX".dim(), hex_string(data));
                }
            }
        }
    }

    fn print_input(&self, data: &[u8]) {
        if !self.should_show_input() {
            return;
        }

        let summary = match parse_report(data) {
            InputReport::KnobFeedback(_) => "KNOB_FEEDBACK".to_string(),
            InputReport::Navigation(buttons) => format!("NAVIGATION {:?}", buttons),
            InputReport::Unrecognized { .. } => "UNRECOGNIZED".to_string(),
        };

        match self.config.format {
            OutputFormat::Json => self.emit_json("in", "report", &summary, data),
            OutputFormat::Text => {
                eprintln!(
                    "{} {}  {} ({} bytes)",
                    "<<<".green(),
                    "RPT".green().bold(),
                    summary,
                    data.len()
                );
                if self.config.show_hex {
                    eprintln!("    {}  {}", "HEX".dim(), hex_string(data));
                }
            }
        }
    }
}

impl Transport for PrinterTransport {
    fn send_report(&self, data: &[u8]) -> Result<(), TransportError> {
        self.print_output("hid", data);
        self.inner.send_report(data)
    }

    fn poll_report(&self, max_len: usize) -> Result<Option<Vec<u8>>, TransportError> {
        let report = self.inner.poll_report(max_len)?;
        if let Some(ref data) = report {
            self.print_input(data);
        }
        Ok(report)
    }

    fn send_bulk(&self, data: &[u8], interface: u8) -> Result<(), TransportError> {
        self.print_output("bulk", data);
        self.inner.send_bulk(data, interface)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }
}
