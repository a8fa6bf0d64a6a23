//! Bar item rendering.

use colored::Colorize;

use crate::config::BAR_LABEL;
use crate::state::VpnInfo;

/// Formats the state as the bar item text.
///
/// `VPN: {ip}`, with ` ({location})` appended once a location is known.
/// With `color` set the label is green.
pub fn render(info: &VpnInfo, color: bool) -> String {
    let label = if color {
        BAR_LABEL.green().to_string()
    } else {
        BAR_LABEL.to_string()
    };

    if info.location.is_empty() {
        format!("{} {}", label, info.ip)
    } else {
        format!("{} {} ({})", label, info.ip, info.location)
    }
}
