use crate::{ir::SignalRef, simulator::NamedSignal};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct VcdWriter {
    writer: BufWriter<File>,
    id_map: HashMap<SignalRef, (String, usize)>,
    signal_order: Vec<SignalRef>,
    last_values: HashMap<SignalRef, u64>,
    timestamp: u64,
}

impl VcdWriter {
    pub fn new<P: AsRef<Path>>(path: P, top: &str, signals: &[NamedSignal]) -> std::io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let mut id_map = HashMap::default();
        let mut signal_order = Vec::new();

        // VCD Header
        writeln!(writer, "$date")?;
        writeln!(
            writer,
            "  {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(writer, "$end")?;
        writeln!(writer, "$version")?;
        writeln!(writer, "  clock12")?;
        writeln!(writer, "$end")?;
        writeln!(writer, "$timescale 1ns $end")?;

        writeln!(writer, "$scope module {} $end", top)?;
        for (num, named) in signals.iter().enumerate() {
            let vcd_id = Self::generate_vcd_id(num);
            let width = named.signal.width;
            writeln!(writer, "$var wire {} {} {} $end", width, vcd_id, named.name)?;
            id_map.insert(named.signal, (vcd_id, width));
            signal_order.push(named.signal);
        }
        writeln!(writer, "$upscope $end")?;

        writeln!(writer, "$enddefinitions $end")?;
        writeln!(writer, "$dumpvars")?;
        writeln!(writer, "$end")?;

        Ok(Self {
            writer,
            id_map,
            signal_order,
            last_values: HashMap::default(),
            timestamp: 0,
        })
    }

    fn generate_vcd_id(num: usize) -> String {
        let mut id = String::new();
        let mut n = num;
        loop {
            let char = ((n % 94) + 33) as u8 as char;
            id.push(char);
            if n < 94 {
                break;
            }
            n = (n / 94) - 1;
        }
        id.chars().rev().collect()
    }

    pub fn dump(&mut self, timestamp: u64, get_val: impl Fn(SignalRef) -> u64) -> std::io::Result<()> {
        if timestamp > self.timestamp || timestamp == 0 {
            writeln!(self.writer, "#{}", timestamp)?;
            self.timestamp = timestamp;
        }

        for signal in &self.signal_order {
            let (vcd_id, width) = &self.id_map[signal];
            let current_val = get_val(*signal);
            let prev_val = self.last_values.get(signal);

            if prev_val != Some(&current_val) {
                if *width == 1 {
                    writeln!(self.writer, "{}{}", current_val, vcd_id)?;
                } else {
                    writeln!(self.writer, "b{:b} {}", current_val, vcd_id)?;
                }
                self.last_values.insert(*signal, current_val);
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
