//! Text Views Module
//! Renders the card grid, the list view and the detail panel.
//!
//! Layout decisions take the viewport as an explicit argument; nothing here
//! reads terminal or environment state.

use clap::ValueEnum;

use crate::data::BusinessRecord;

/// Widths below this use the mobile layout.
pub const MOBILE_BREAKPOINT: u16 = 768;

/// Widths from this up get the full four-column grid.
pub const WIDE_BREAKPOINT: u16 = 1024;

/// Badge shown next to verified businesses.
pub const VERIFIED_BADGE: &str = "[WEFOOD verified]";

/// Company tab text when a record has no description.
pub const NO_COMPANY_DETAILS: &str = "No company details available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: WIDE_BREAKPOINT }
    }
}

impl Viewport {
    pub fn new(width: u16) -> Self {
        Self { width }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        if self.width < MOBILE_BREAKPOINT {
            Breakpoint::Mobile
        } else {
            Breakpoint::Desktop
        }
    }

    /// Cards per grid row: 1, 2 or 4.
    pub fn grid_columns(&self) -> usize {
        match self.width {
            w if w < MOBILE_BREAKPOINT => 1,
            w if w < WIDE_BREAKPOINT => 2,
            _ => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Render a record set in the given mode.
pub fn render_records(records: &[BusinessRecord], mode: ViewMode, viewport: Viewport) -> String {
    match mode {
        ViewMode::Grid => render_grid(records, viewport),
        ViewMode::List => records.iter().map(render_list_line).collect::<Vec<_>>().join("\n"),
    }
}

fn render_grid(records: &[BusinessRecord], viewport: Viewport) -> String {
    let separator = "-".repeat(40);

    records
        .chunks(viewport.grid_columns())
        .map(|row| row.iter().map(render_card).collect::<Vec<_>>().join("\n\n"))
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", separator))
}

fn render_card(record: &BusinessRecord) -> String {
    let mut lines = vec![format!("[{}] {}{}", record.id, record.name, badge(record))];
    if !record.description.is_empty() {
        lines.push(format!("    {}", record.description));
    }
    if !record.addresses.is_empty() {
        lines.push(format!("    @ {}", record.addresses));
    }
    lines.join("\n")
}

fn render_list_line(record: &BusinessRecord) -> String {
    let mut line = format!("{:>4}  {}{}", record.id, record.name, badge(record));
    for field in [&record.addresses, &record.phone] {
        if !field.is_empty() {
            line.push_str("  | ");
            line.push_str(field);
        }
    }
    line
}

fn badge(record: &BusinessRecord) -> String {
    if record.verified {
        format!(" {}", VERIFIED_BADGE)
    } else {
        String::new()
    }
}

/// Render the detail panel: basic info, company info and services.
pub fn render_detail(record: &BusinessRecord, viewport: Viewport) -> String {
    let mut out = Vec::new();

    out.push(format!("{}{}", record.name, badge(record)));
    if !record.contact.is_empty() {
        out.push(format!("Contact person: {}", record.contact));
    }
    out.push(String::new());

    out.push("Basic info".to_string());
    let basic = [
        ("Address", &record.addresses),
        ("Phone", &record.phone),
        ("Fax", &record.fax),
        ("Website", &record.website),
        ("Contact", &record.contact),
    ];
    for (label, value) in basic.iter().filter(|(_, value)| !value.is_empty()) {
        out.push(field_line(label, value, viewport));
    }
    out.push(String::new());

    out.push("Company info".to_string());
    if record.description.is_empty() {
        out.push(format!("  {}", NO_COMPANY_DETAILS));
    } else {
        out.push(format!("  {}", record.description));
    }
    out.push(String::new());

    out.push("Services".to_string());
    let services = record.services();
    if services.is_empty() {
        out.push("  -".to_string());
    }
    out.extend(services.iter().map(|service| format!("  * {}", service)));

    out.join("\n")
}

fn field_line(label: &str, value: &str, viewport: Viewport) -> String {
    match viewport.breakpoint() {
        Breakpoint::Mobile => format!("  {}\n    {}", label, value),
        Breakpoint::Desktop => format!("  {:<9}{}", format!("{}:", label), value),
    }
}
