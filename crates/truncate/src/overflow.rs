use core_types::Overflow;
use layout::Surface;

/// Whether the rendered content exceeds the container's visible box.
///
/// The inline `overflow` style is forced to `hidden` while measuring when it
/// is unset or `visible`, then restored exactly. One pixel of slack absorbs
/// sub-pixel rounding in the host.
pub fn is_overflowing<S: Surface + ?Sized>(surface: &mut S) -> bool {
    let current = surface.overflow();
    let forced = matches!(current, None | Some(Overflow::Visible));
    if forced {
        surface.set_overflow(Some(Overflow::Hidden));
    }

    let client = surface.client_size();
    let scroll = surface.scroll_size();
    let overflowing =
        client.width < scroll.width - 1.0 || client.height < scroll.height - 1.0;

    if forced {
        surface.set_overflow(current);
    }
    overflowing
}
