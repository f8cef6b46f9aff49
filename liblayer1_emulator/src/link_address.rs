use super::constants::{NUM_LINKS, SUBTOWERS_PER_SLOT, TOWERS_PER_LINK};
use super::error::AddressError;

/// LinkAddress is a tower's position in the board's optical-link layout:
/// which link carries it, which slot of that link's data stream, and which
/// of the two sub-towers multiplexed onto that slot.
///
/// The physical (ieta, iphi) coordinate and the link address are related by
/// an exact bijection: the link pair index is `(iphi - 1) / 2` with the odd
/// link of the pair carrying negative eta, the slot is `|ieta| - 1`, and the
/// sub-tower distinguishes odd iphi (sub-tower 1) from even (sub-tower 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAddress {
    pub link: usize,
    pub slot: usize,
    pub subtower: usize,
}

impl LinkAddress {
    /// Construct from known-good grid indices (used when walking the grid)
    pub fn new(link: usize, slot: usize, subtower: usize) -> Self {
        debug_assert!(link < NUM_LINKS && slot < TOWERS_PER_LINK && subtower < SUBTOWERS_PER_SLOT);
        Self {
            link,
            slot,
            subtower,
        }
    }

    /// Resolve a physical tower coordinate to its link address.
    ///
    /// Fails with [AddressError::OutOfRange] if the derived address falls
    /// outside the 72x40x2 grid, or if it does not map back to the input
    /// coordinate. The round-trip check is what rejects coordinates like
    /// iphi = 0, whose truncating division would alias onto a valid cell.
    pub fn from_physical(ieta: i16, iphi: u16) -> Result<Self, AddressError> {
        let link = 2 * ((iphi as i32 - 1) / 2) + i32::from(ieta < 0);
        let slot = (ieta as i32).abs() - 1;
        let subtower = i32::from(iphi % 2 != 0);

        let out_of_range = || AddressError::OutOfRange {
            ieta,
            iphi,
            link,
            slot,
            subtower,
        };

        if !(0..NUM_LINKS as i32).contains(&link) || !(0..TOWERS_PER_LINK as i32).contains(&slot) {
            return Err(out_of_range());
        }

        let address = Self::new(link as usize, slot as usize, subtower as usize);
        if address.to_physical() != (ieta, iphi) {
            return Err(out_of_range());
        }
        Ok(address)
    }

    /// The physical tower coordinate carried at this grid position.
    ///
    /// Exact inverse of [LinkAddress::from_physical] over the valid domain.
    pub fn to_physical(&self) -> (i16, u16) {
        let abs_ieta = self.slot as i16 + 1;
        let ieta = if self.link % 2 == 0 {
            abs_ieta
        } else {
            -abs_ieta
        };
        let iphi = (2 * (self.link / 2) + if self.subtower == 1 { 1 } else { 2 }) as u16;
        (ieta, iphi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_ABS_IETA, MAX_IPHI};

    #[test]
    fn test_known_mappings() {
        let address = LinkAddress::from_physical(1, 1).unwrap();
        assert_eq!(address, LinkAddress::new(0, 0, 1));

        let address = LinkAddress::from_physical(-1, 1).unwrap();
        assert_eq!(address, LinkAddress::new(1, 0, 1));

        let address = LinkAddress::from_physical(1, 2).unwrap();
        assert_eq!(address, LinkAddress::new(0, 0, 0));

        let address = LinkAddress::from_physical(40, 72).unwrap();
        assert_eq!(address, LinkAddress::new(70, 39, 0));

        let address = LinkAddress::from_physical(-40, 71).unwrap();
        assert_eq!(address, LinkAddress::new(71, 39, 1));
    }

    #[test]
    fn test_round_trip_over_full_domain() {
        for abs_ieta in 1..=MAX_ABS_IETA {
            for iphi in 1..=MAX_IPHI {
                for ieta in [abs_ieta, -abs_ieta] {
                    let address = LinkAddress::from_physical(ieta, iphi).unwrap();
                    assert_eq!(address.to_physical(), (ieta, iphi));
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_coordinates() {
        assert!(LinkAddress::from_physical(1, 0).is_err());
        assert!(LinkAddress::from_physical(1, 73).is_err());
        assert!(LinkAddress::from_physical(0, 1).is_err());
        assert!(LinkAddress::from_physical(41, 1).is_err());
        assert!(LinkAddress::from_physical(-41, 1).is_err());
        assert!(LinkAddress::from_physical(-42, 36).is_err());
    }

    #[test]
    fn test_error_carries_derived_address() {
        let err = LinkAddress::from_physical(-41, 3).unwrap_err();
        let AddressError::OutOfRange {
            ieta,
            iphi,
            link,
            slot,
            subtower,
        } = err;
        assert_eq!((ieta, iphi), (-41, 3));
        assert_eq!((link, slot, subtower), (3, 40, 1));
    }
}
