//! Delivery area to EIC bidding zone mapping.
//!
//! The transparency platform addresses bidding zones by EIC code rather than
//! by the short area names used on power exchanges. Only the Nordic and
//! Baltic day-ahead areas are mapped here.

/// EIC code for a delivery area, when the area is known.
///
/// Lookup is exact; callers are expected to pass upper-case area codes such
/// as `"NO1"` or `"SE3"`.
#[must_use]
pub fn eic_for(region: &str) -> Option<&'static str> {
    let code = match region {
        "NO1" => "10YNO-1--------2",
        "NO2" => "10YNO-2--------T",
        "NO3" => "10YNO-3--------J",
        "NO4" => "10YNO-4--------9",
        "NO5" => "10Y1001A1001A48H",
        "SE1" => "10Y1001A1001A44P",
        "SE2" => "10Y1001A1001A45N",
        "SE3" => "10Y1001A1001A46L",
        "SE4" => "10Y1001A1001A47J",
        "DK1" => "10YDK-1--------W",
        "DK2" => "10YDK-2--------M",
        "FI" => "10YFI-1--------U",
        "EE" => "10Y1001A1001A39I",
        "LV" => "10YLV-1001A00074",
        "LT" => "10YLT-1001A0008Q",
        _ => return None,
    };
    Some(code)
}
