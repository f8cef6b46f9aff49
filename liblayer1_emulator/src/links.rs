use std::io::Write;

use byteorder::{BigEndian, ByteOrder};

use super::constants::*;
use super::error::{AddressError, LinksError};
use super::link_address::LinkAddress;
use super::trigger_tower::TriggerTower;

/// Layer1Links models one event's worth of the board's output: the full
/// 72-link x 40-slot x 2-sub-tower grid of [TriggerTower]s and the packed
/// link buffer derived from them.
///
/// One Layer1Links is built per event. Calorimeter hits are ingested
/// through [Layer1Links::add_ecal_tower] and [Layer1Links::add_hcal_tower],
/// which resolve the physical coordinate to a grid cell and update that
/// tower in place. [Layer1Links::write_to_file] then packs every tower's
/// output word into the link buffer and renders the hex dump compared
/// against captured hardware output.
#[derive(Debug, Clone)]
pub struct Layer1Links {
    event: u32,
    lumi: u32,
    run: u32,
    towers: Vec<TriggerTower>,
    links: Vec<u8>,
}

impl Layer1Links {
    /// Create the link grid for one event, eagerly building every tower at
    /// the physical coordinate its grid position carries.
    pub fn new(event: u32, lumi: u32, run: u32) -> Self {
        let mut towers = Vec::with_capacity(NUM_LINKS * TOWERS_PER_LINK * SUBTOWERS_PER_SLOT);
        for link in 0..NUM_LINKS {
            for slot in 0..TOWERS_PER_LINK {
                for subtower in 0..SUBTOWERS_PER_SLOT {
                    let (ieta, iphi) = LinkAddress::new(link, slot, subtower).to_physical();
                    towers.push(TriggerTower::new(ieta, iphi));
                }
            }
        }

        Self {
            event,
            lumi,
            run,
            towers,
            links: vec![0; NUM_LINKS * TOWERS_PER_LINK * BYTES_PER_SLOT],
        }
    }

    fn tower_index(address: &LinkAddress) -> usize {
        (address.link * TOWERS_PER_LINK + address.slot) * SUBTOWERS_PER_SLOT + address.subtower
    }

    fn slot_byte_index(link: usize, slot: usize) -> usize {
        (link * TOWERS_PER_LINK + slot) * BYTES_PER_SLOT
    }

    /// The tower at a given grid position
    pub fn tower(&self, address: &LinkAddress) -> &TriggerTower {
        &self.towers[Self::tower_index(address)]
    }

    /// Ingest one ECAL tower reading.
    ///
    /// Fails without touching any state if (ieta, iphi) does not resolve to
    /// a grid cell.
    pub fn add_ecal_tower(
        &mut self,
        ieta: i16,
        iphi: u16,
        energy: u16,
        fine_grain: bool,
    ) -> Result<(), AddressError> {
        let address = LinkAddress::from_physical(ieta, iphi)?;
        let tower = &mut self.towers[Self::tower_index(&address)];
        tower.set_ecal_energy(energy);
        tower.set_ecal_fg(fine_grain);
        Ok(())
    }

    /// Ingest one HCAL tower reading. Same contract as
    /// [Layer1Links::add_ecal_tower].
    pub fn add_hcal_tower(
        &mut self,
        ieta: i16,
        iphi: u16,
        energy: u16,
        fine_grain: bool,
    ) -> Result<(), AddressError> {
        let address = LinkAddress::from_physical(ieta, iphi)?;
        let tower = &mut self.towers[Self::tower_index(&address)];
        tower.set_hcal_energy(energy);
        tower.set_hcal_fg(fine_grain);
        Ok(())
    }

    /// Pack every tower's output word into the link buffer.
    ///
    /// Each 4-byte slot carries sub-tower 1's word big-endian in bytes 0-1
    /// and sub-tower 0's word big-endian in bytes 2-3. Every byte is
    /// rewritten, so re-running after further ingestion leaves no stale
    /// state; with unchanged towers the buffer is bit-identical.
    pub fn populate_links(&mut self) {
        for link in 0..NUM_LINKS {
            for slot in 0..TOWERS_PER_LINK {
                let word_0 = self
                    .tower(&LinkAddress::new(link, slot, 0))
                    .output_word();
                let word_1 = self
                    .tower(&LinkAddress::new(link, slot, 1))
                    .output_word();

                let start = Self::slot_byte_index(link, slot);
                let buffer = &mut self.links[start..start + BYTES_PER_SLOT];
                BigEndian::write_u16(&mut buffer[0..2], word_1);
                BigEndian::write_u16(&mut buffer[2..4], word_0);
            }
        }
    }

    /// Render the packed links as the hex dump format used for hardware
    /// comparison: a run/lumi/event header, one line per link with 40
    /// 8-digit hex words, and a terminating blank line.
    ///
    /// Refreshes the link buffer first, so the dump always reflects the
    /// current tower states.
    pub fn write_to_file<W: Write>(&mut self, out: &mut W) -> Result<(), LinksError> {
        self.populate_links();

        writeln!(
            out,
            "run: {} lumi: {} event: {}",
            self.run, self.lumi, self.event
        )?;

        for link in 0..NUM_LINKS {
            write!(out, "Link {:02}:", link)?;
            for slot in 0..TOWERS_PER_LINK {
                let start = Self::slot_byte_index(link, slot);
                let word = BigEndian::read_u32(&self.links[start..start + BYTES_PER_SLOT]);
                write!(out, " {:08X}", word)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_towers_sit_at_their_physical_coordinate() {
        let links = Layer1Links::new(0, 0, 0);
        let address = LinkAddress::from_physical(-17, 33).unwrap();
        let tower = links.tower(&address);
        assert_eq!(tower.ieta(), -17);
        assert_eq!(tower.iphi(), 33);
    }

    #[test]
    fn test_failed_ingestion_leaves_state_untouched() {
        let mut links = Layer1Links::new(1, 1, 1);
        links.add_ecal_tower(2, 7, 42, true).unwrap();
        let snapshot = links.towers.clone();

        assert!(links.add_ecal_tower(1, 0, 99, true).is_err());
        assert!(links.add_ecal_tower(41, 10, 99, false).is_err());
        assert!(links.add_hcal_tower(-1, 73, 99, true).is_err());
        assert_eq!(links.towers, snapshot);
    }

    #[test]
    fn test_populate_links_is_idempotent() {
        let mut links = Layer1Links::new(1, 1, 1);
        links.add_ecal_tower(3, 12, 100, true).unwrap();
        links.add_hcal_tower(-8, 41, 7, false).unwrap();

        links.populate_links();
        let first = links.links.clone();
        links.populate_links();
        assert_eq!(links.links, first);
    }

    #[test]
    fn test_repacking_clears_stale_bytes() {
        let mut links = Layer1Links::new(1, 1, 1);
        links.add_ecal_tower(3, 12, 100, false).unwrap();
        links.populate_links();

        links.add_ecal_tower(3, 12, 0, false).unwrap();
        links.populate_links();
        assert!(links.links.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_slot_byte_order() {
        let mut links = Layer1Links::new(1, 1, 1);
        // (ieta=1, iphi=1) is link 0, slot 0, sub-tower 1
        links.add_ecal_tower(1, 1, 0x0F, true).unwrap();
        // (ieta=1, iphi=2) is link 0, slot 0, sub-tower 0
        links.add_hcal_tower(1, 2, 0x23, false).unwrap();
        links.populate_links();

        assert_eq!(links.links[0..4], [0x80, 0x0F, 0x00, 0x23]);
    }

    #[test]
    fn test_end_to_end_dump() {
        let mut links = Layer1Links::new(1, 1, 1);
        links.add_ecal_tower(1, 1, 10, true).unwrap();
        links.add_hcal_tower(1, 1, 5, false).unwrap();

        let mut out: Vec<u8> = Vec::new();
        links.write_to_file(&mut out).unwrap();
        let dump = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 74);
        assert_eq!(lines[0], "run: 1 lumi: 1 event: 1");
        assert_eq!(lines[73], "");

        // The single populated tower is sub-tower 1 of link 0, slot 0
        let mut expected = String::from("Link 00: 800F0000");
        for _ in 1..TOWERS_PER_LINK {
            expected.push_str(" 00000000");
        }
        assert_eq!(lines[1], expected);

        for (link, line) in lines[2..73].iter().enumerate() {
            let mut empty = format!("Link {:02}:", link + 1);
            for _ in 0..TOWERS_PER_LINK {
                empty.push_str(" 00000000");
            }
            assert_eq!(*line, empty);
        }
    }
}
