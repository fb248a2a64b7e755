//! Scripted TDC fake shared by the host tests
//!
//! Records every CSR access in order and answers status reads from
//! programmed sequences. The last value of a sequence sticks, so a script
//! of `[0, 0, 1]` reads "not yet, not yet, done, done, ...".

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use tdc_firmware::hal::csr::{Csr, CsrBus};

/// One recorded bus access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// CSR read and the value returned
    Read(Csr, u32),
    /// CSR write and the value written
    Write(Csr, u32),
}

/// Fake TDC core
#[derive(Default)]
pub struct FakeTdc {
    log: Vec<Op>,
    scripts: HashMap<Csr, VecDeque<u32>>,
    values: HashMap<Csr, u32>,
    his: HashMap<u32, u32>,
    lut: HashMap<u32, u32>,
}

impl FakeTdc {
    /// Device that answers every handshake on the first poll
    pub fn responsive() -> Self {
        let mut fake = Self::default();
        fake.set(Csr::Ready, 1);
        fake.set(Csr::FreezeAck, 1);
        fake.set(Csr::CsLast, 1);
        fake.set(Csr::OcReady, 1);
        fake
    }

    /// Fixed value for a CSR
    pub fn set(&mut self, csr: Csr, value: u32) -> &mut Self {
        self.scripts.remove(&csr);
        self.values.insert(csr, value);
        self
    }

    /// Sequence of values for successive reads of a CSR
    pub fn script(&mut self, csr: Csr, values: &[u32]) -> &mut Self {
        self.scripts.insert(csr, values.iter().copied().collect());
        self
    }

    /// Boolean sequence for a status bit
    pub fn script_flag(&mut self, csr: Csr, values: &[bool]) -> &mut Self {
        let raw: Vec<u32> = values.iter().map(|&v| u32::from(v)).collect();
        self.script(csr, &raw)
    }

    /// Histogram bin contents
    pub fn set_bin(&mut self, addr: u32, value: u32) -> &mut Self {
        self.his.insert(addr, value);
        self
    }

    /// Calibration LUT contents
    pub fn set_lut(&mut self, addr: u32, value: u32) -> &mut Self {
        self.lut.insert(addr, value);
        self
    }

    /// Every access so far
    pub fn log(&self) -> &[Op] {
        &self.log
    }

    /// Forget recorded accesses
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Writes to one CSR, in order
    pub fn writes_to(&self, csr: Csr) -> Vec<u32> {
        self.log
            .iter()
            .filter_map(|op| match op {
                Op::Write(c, v) if *c == csr => Some(*v),
                _ => None,
            })
            .collect()
    }

    /// Number of reads of one CSR
    pub fn reads_of(&self, csr: Csr) -> usize {
        self.log
            .iter()
            .filter(|op| matches!(op, Op::Read(c, _) if *c == csr))
            .count()
    }

    fn next_value(&mut self, csr: Csr) -> u32 {
        if let Some(script) = self.scripts.get_mut(&csr) {
            if script.len() > 1 {
                return script.pop_front().unwrap_or_default();
            }
            if let Some(&last) = script.front() {
                return last;
            }
        }
        self.values.get(&csr).copied().unwrap_or_default()
    }
}

impl CsrBus for FakeTdc {
    fn read(&mut self, csr: Csr) -> u32 {
        let value = match csr {
            Csr::HisD => {
                let addr = self.values.get(&Csr::HisA).copied().unwrap_or_default();
                self.his.get(&addr).copied().unwrap_or_default()
            }
            Csr::LutD => {
                let addr = self.values.get(&Csr::LutA).copied().unwrap_or_default();
                self.lut.get(&addr).copied().unwrap_or_default()
            }
            _ => self.next_value(csr),
        };
        self.log.push(Op::Read(csr, value));
        value
    }

    fn write(&mut self, csr: Csr, value: u32) {
        self.log.push(Op::Write(csr, value));
        self.values.insert(csr, value);
    }
}
