//! Turns directory handlers into picker actions and binds them.

use std::sync::Arc;

use cder_picker_api::{KeyBinding, KeyMode, PickerAction, PickerControl, PickerHost, Trigger};
use indexmap::IndexMap;

use crate::config::DirHandler;

/// Wrap `handler` so that firing it closes the picker, then passes the
/// highlighted entry's path to `handler`. Nothing is called without a
/// selection.
pub fn wrap(handler: DirHandler) -> PickerAction {
    Arc::new(move |picker: &mut dyn PickerControl| {
        picker.close_list();
        match picker.selection() {
            Some(entry) => handler(&entry.value),
            None => {
                log::debug!("no entry highlighted, skipping handler");
                Ok(())
            }
        }
    })
}

/// Register every mapping with `host`.
///
/// The `default` trigger replaces the host's default selection; key triggers
/// are bound in both insert and normal mode.
pub fn attach_mappings<H>(host: &mut H, mappings: &IndexMap<Trigger, DirHandler>)
where
    H: PickerHost + ?Sized,
{
    for (trigger, handler) in mappings {
        let action = wrap(Arc::clone(handler));
        match trigger {
            Trigger::Default => {
                host.register_key_binding(KeyBinding::new(KeyMode::Insert, Trigger::Default, action));
            }
            Trigger::Keys(_) => {
                for mode in [KeyMode::Insert, KeyMode::Normal] {
                    host.register_key_binding(KeyBinding::new(
                        mode,
                        trigger.clone(),
                        Arc::clone(&action),
                    ));
                }
            }
        }
    }
}
