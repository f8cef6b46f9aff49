//! Hardware constants of the Layer-1 board topology and link word format.

/// Number of optical output links on the board
pub const NUM_LINKS: usize = 72;
/// Number of tower slots carried by each link
pub const TOWERS_PER_LINK: usize = 40;
/// Number of towers multiplexed onto one link/slot pair
pub const SUBTOWERS_PER_SLOT: usize = 2;
/// Size of one packed link word (two 16-bit tower lanes)
pub const BYTES_PER_SLOT: usize = 4;

/// Largest valid |ieta|; slots are 0..TOWERS_PER_LINK
pub const MAX_ABS_IETA: i16 = TOWERS_PER_LINK as i16;
/// Largest valid iphi; link pairs are 0..NUM_LINKS/2
pub const MAX_IPHI: u16 = NUM_LINKS as u16;

/// The tower adder is 9 bits wide; overflow wraps
pub const TOTAL_ENERGY_MASK: u16 = 0x1FF;

/// ECAL fine-grain flag, bit 15 of the output word
pub const ECAL_FG_BIT: u16 = 0x8000;
/// HCAL fine-grain flag, bit 14 of the output word
pub const HCAL_FG_BIT: u16 = 0x4000;
/// E-over-H discriminant, bit 13 of the output word
pub const E_OVER_H_BIT: u16 = 0x2000;
/// Denominator discriminant, bit 12 of the output word
pub const DENOM_BIT: u16 = 0x1000;
/// Energy ratio field, bits 11-9 of the output word
pub const E_RATIO_SHIFT: u16 = 9;

/// ECAL hits above this energy are echoed to the log when debug is on
pub const ECAL_DEBUG_THRESHOLD: u16 = 5;
/// HCAL hits above this energy are echoed to the log when debug is on
pub const HCAL_DEBUG_THRESHOLD: u16 = 20;
