//! Qibla command: bearing and distance to the Kaaba.

use anyhow::Result;

use super::CommandContext;
use crate::geo::compute_qibla;

/// Handle the qibla command.
pub fn handle_qibla_command(ctx: &CommandContext) -> Result<()> {
    let qibla = compute_qibla(ctx.coordinate);

    if ctx.json {
        return super::print_json(&qibla);
    }

    log_version!();
    log_block_start!("Qibla from {}", ctx.coordinate.display());
    if qibla.is_degenerate() {
        log_indented!("You are at the Kaaba; every direction faces the Qibla");
    } else {
        log_indented!(
            "Bearing:  {:.1}° ({}) from true north",
            qibla.bearing_degrees,
            qibla.compass_direction().as_str()
        );
        log_indented!("Distance: {:.0} km", qibla.distance_km);
    }
    log_end!();
    Ok(())
}

/// Display help for the qibla command
pub fn display_help() {
    log_version!();
    log_block_start!("qibla - Direction of prayer");
    log_block_start!("Usage: salah qibla");
    log_block_start!("Description:");
    log_indented!("Shows the great-circle bearing from true north and the distance");
    log_indented!("to the Kaaba in Mecca. Compasses point to magnetic north, so");
    log_indented!("correct for the local magnetic declination.");
    log_block_start!("Examples:");
    log_indented!("salah qibla");
    log_indented!("salah --at 40.7128,-74.0060 qibla");
    log_end!();
}
