//! Parsing of `ftdi://vendor:product/interface` device URLs.

use std::str::FromStr;

const SCHEME: &str = "ftdi://";

const FTDI_VENDOR_ID: u16 = 0x0403;

const PRODUCTS: &[(&str, u16)] = &[
    ("232r", 0x6001),
    ("2232h", 0x6010),
    ("4232h", 0x6011),
    ("232h", 0x6014),
    ("230x", 0x6015),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid device selector '{selector}': {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: &'static str,
}

/// USB bridge named by a device URL such as `ftdi://ftdi:232h/1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSelector {
    pub vendor_id: u16,
    pub product_id: u16,
    /// 1-based MPSSE interface, 1 = A.
    pub interface: u8,
}

impl FromStr for DeviceSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| SelectorError {
            selector: s.to_string(),
            reason,
        };

        let rest = s.strip_prefix(SCHEME).ok_or_else(|| fail("missing ftdi:// scheme"))?;
        let (device, interface) = rest.split_once('/').unwrap_or((rest, ""));

        let mut fields = device.split(':');
        let vendor = fields.next().unwrap_or_default();
        let product = fields.next().unwrap_or_default();
        if fields.next().is_some() {
            return Err(fail("serial and bus index qualifiers are not supported"));
        }

        let vendor_id = match vendor {
            "" | "ftdi" => FTDI_VENDOR_ID,
            id => parse_id(id).ok_or_else(|| fail("unknown vendor"))?,
        };
        let product_id = match product {
            "" => return Err(fail("missing product")),
            name => PRODUCTS
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(name))
                .map(|(_, pid)| *pid)
                .or_else(|| parse_id(name))
                .ok_or_else(|| fail("unknown product"))?,
        };
        let interface = match interface.trim_end_matches('/') {
            "" => 1,
            n => n
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=4).contains(n))
                .ok_or_else(|| fail("interface must be 1 to 4"))?,
        };

        Ok(Self {
            vendor_id,
            product_id,
            interface,
        })
    }
}

fn parse_id(text: &str) -> Option<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).ok()
}

impl std::fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}0x{:04x}:0x{:04x}/{}",
            SCHEME, self.vendor_id, self.product_id, self.interface
        )
    }
}
