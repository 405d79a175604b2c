use gilrs::{Gamepad, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

use super::device::VENDOR_MICROSOFT;
use super::{ControllerError, Guid, PhysicalDevice};

/// Connected pads in gilrs order, as players 1..N
///
/// gilrs does not expose raw control indices per key, so these devices carry
/// no native capture and are resolved through the community database.
pub fn enumerate_gamepads() -> Result<Vec<PhysicalDevice>, ControllerError> {
    info!("Initializing gilrs controller interface");
    let gilrs = match Gilrs::new() {
        Ok(g) => {
            info!("Successfully initialized gilrs");
            g
        }
        Err(e) => {
            error!("Failed to initialize gilrs: {}", e);
            return Err(ControllerError::InitializationError(e.to_string()));
        }
    };

    let gamepads: Vec<(GamepadId, Gamepad<'_>)> = gilrs.gamepads().collect();
    if gamepads.is_empty() {
        warn!("No gamepad connected");
    }

    let devices = gamepads
        .into_iter()
        .enumerate()
        .map(|(position, (id, gamepad))| {
            let device = from_gamepad(position, usize::from(id), &gamepad);
            debug!(
                "Found gamepad {} ({}) as player {}",
                device.name, device.guid, device.player_index
            );
            device
        })
        .collect();
    Ok(devices)
}

fn from_gamepad(position: usize, id: usize, gamepad: &Gamepad<'_>) -> PhysicalDevice {
    let vendor_id = gamepad.vendor_id().unwrap_or_default();
    let product_id = gamepad.product_id().unwrap_or_default();
    PhysicalDevice::gamepad(
        Guid::from_bytes(gamepad.uuid()),
        position as u32 + 1,
        id as u32,
        gamepad.name(),
    )
    .with_ids(vendor_id, product_id)
    .with_xinput(vendor_id == VENDOR_MICROSOFT)
}
