use super::constants::*;

/// A single calorimeter trigger tower and its 16-bit hardware encoding.
///
/// The tower's physical position (ieta, iphi) is fixed at construction;
/// only the energies and fine-grain flags are written afterwards, one
/// calorimeter hit at a time. `output_word` reduces the state to the
/// 16-bit lane the board transmits for this tower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerTower {
    ieta: i16,
    iphi: u16,
    ecal_fg: bool,
    hcal_fg: bool,
    ecal_energy: u16,
    hcal_energy: u16,
}

impl TriggerTower {
    /// Create an empty tower at the given physical position
    pub fn new(ieta: i16, iphi: u16) -> Self {
        Self {
            ieta,
            iphi,
            ecal_fg: false,
            hcal_fg: false,
            ecal_energy: 0,
            hcal_energy: 0,
        }
    }

    pub fn ieta(&self) -> i16 {
        self.ieta
    }

    pub fn iphi(&self) -> u16 {
        self.iphi
    }

    pub fn set_ecal_fg(&mut self, fg: bool) {
        self.ecal_fg = fg;
    }

    pub fn set_hcal_fg(&mut self, fg: bool) {
        self.hcal_fg = fg;
    }

    pub fn set_ecal_energy(&mut self, energy: u16) {
        self.ecal_energy = energy;
    }

    pub fn set_hcal_energy(&mut self, energy: u16) {
        self.hcal_energy = energy;
    }

    /// Sum of both calorimeter energies through the board's 9-bit adder.
    /// Overflow wraps, matching the hardware.
    fn total_energy(&self) -> u16 {
        self.ecal_energy.wrapping_add(self.hcal_energy) & TOTAL_ENERGY_MASK
    }

    // Zeroed for the July 2014 integration test; the calibration that
    // feeds these fields is not wired up in this encoding era.
    fn e_ratio(&self) -> u16 {
        0
    }

    fn denom(&self) -> bool {
        false
    }

    fn e_over_h(&self) -> bool {
        false
    }

    /// Encode the tower into its 16-bit link lane.
    ///
    /// Bit 15: ECAL fine grain. Bit 14: HCAL fine grain. Bit 13: E-over-H.
    /// Bit 12: denominator. Bits 11-9: energy ratio. Bits 8-0: total energy.
    pub fn output_word(&self) -> u16 {
        let mut word: u16 = 0;

        if self.ecal_fg {
            word |= ECAL_FG_BIT;
        }
        if self.hcal_fg {
            word |= HCAL_FG_BIT;
        }
        if self.e_over_h() {
            word |= E_OVER_H_BIT;
        }
        if self.denom() {
            word |= DENOM_BIT;
        }
        word |= self.e_ratio() << E_RATIO_SHIFT;
        word |= self.total_energy();

        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tower_word() {
        let tower = TriggerTower::new(1, 1);
        assert_eq!(tower.output_word(), 0x0000);
    }

    #[test]
    fn test_energy_sum_wraps_at_nine_bits() {
        let mut tower = TriggerTower::new(5, 10);
        tower.set_ecal_energy(300);
        tower.set_hcal_energy(300);
        // 600 mod 512
        assert_eq!(tower.output_word(), 88);
    }

    #[test]
    fn test_fine_grain_bits() {
        let mut tower = TriggerTower::new(-3, 20);
        tower.set_ecal_energy(5);
        tower.set_ecal_fg(true);
        tower.set_hcal_fg(false);
        assert_eq!(tower.output_word(), 0x8005);

        tower.set_hcal_fg(true);
        assert_eq!(tower.output_word(), 0xC005);

        tower.set_ecal_fg(false);
        assert_eq!(tower.output_word(), 0x4005);
    }

    #[test]
    fn test_word_is_pure() {
        let mut tower = TriggerTower::new(1, 1);
        tower.set_ecal_energy(10);
        tower.set_hcal_energy(5);
        tower.set_ecal_fg(true);
        assert_eq!(tower.output_word(), 0x800F);
        assert_eq!(tower.output_word(), 0x800F);
    }
}
