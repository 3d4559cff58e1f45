use crate::{
    IOContext, SignalRef, Simulator, SimulatorBuilder, SimulatorError,
    ir::Port,
    scheduler::{ClockDef, Scheduler},
    simulator::drive,
};

/// A timed simulation wrapper around the cycle-level [`Simulator`].
///
/// Manages simulation time, the periodic system clock, and an event queue of
/// scheduled pin writes. Only rising clock edges evaluate the design.
pub struct Simulation {
    pub(crate) simulator: Simulator,
    pub(crate) scheduler: Scheduler,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("time", &self.scheduler.time)
            .field("cycles", &self.simulator.cycles)
            .finish()
    }
}

impl Simulation {
    pub fn builder() -> SimulatorBuilder<Simulation> {
        SimulatorBuilder::<Simulation>::create()
    }

    pub(crate) fn new(simulator: Simulator) -> Self {
        Self {
            simulator,
            scheduler: Scheduler::new(),
        }
    }

    /// The underlying cycle-level simulator, for state inspection.
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Writes changed pin values to the VCD file, if one was configured.
    pub fn dump(&mut self, timestamp: u64) -> Result<(), SimulatorError> {
        self.simulator.dump(timestamp)
    }

    /// Resolves a pin name into a [`SignalRef`].
    pub fn signal(&self, name: &str) -> Result<SignalRef, SimulatorError> {
        self.simulator.signal(name)
    }

    /// Samples the current value of any pin.
    pub fn get(&self, signal: SignalRef) -> u64 {
        self.simulator.get(signal)
    }

    /// Drives input pins immediately, between scheduled events.
    pub fn modify<F>(&mut self, f: F) -> Result<(), SimulatorError>
    where
        F: FnOnce(&mut IOContext) -> Result<(), SimulatorError>,
    {
        self.simulator.modify(f)
    }

    /// Starts the system clock with the given period, first rising edge at
    /// `initial_delay` (absolute, no earlier than the current time).
    /// Redefining the clock cancels its pending edges and pulls `clk` low.
    pub fn add_clock(&mut self, period: u64, initial_delay: u64) -> Result<(), SimulatorError> {
        if period < 2 {
            return Err(SimulatorError::InvalidClockPeriod(period));
        }
        if self.scheduler.clock.is_some() {
            self.scheduler.cancel_clock();
            self.simulator.clk_level = false;
        }
        self.scheduler.clock = Some(ClockDef { period });

        let clk = self.simulator.signal(Port::Clk.name())?;
        self.scheduler.push(initial_delay.max(self.scheduler.time), clk, 1);
        Ok(())
    }

    /// Schedule a write to an input pin at a specific time.
    pub fn schedule(&mut self, port: &str, time: u64, value: u64) -> Result<(), SimulatorError> {
        let signal = self.simulator.signal(port)?;
        if !signal.port.is_drivable() {
            return Err(SimulatorError::NotAnInput(port.to_string()));
        }
        if time < self.scheduler.time {
            return Err(SimulatorError::ScheduleInPast {
                time,
                now: self.scheduler.time,
            });
        }
        self.scheduler.push(time, signal, value);
        Ok(())
    }

    /// Advance time to the next scheduled event and process all events at that time.
    /// Returns the new simulation time, or None if no events are scheduled.
    pub fn step(&mut self) -> Result<Option<u64>, SimulatorError> {
        let (current_time, events_to_process) = match self.scheduler.pop_all_at_next_time() {
            Some(res) => res,
            None => return Ok(None),
        };

        self.scheduler.time = current_time;

        for ev in &events_to_process {
            if !ev.is_clock() {
                drive(&mut self.simulator.inputs, ev.signal, ev.next_val)?;
                continue;
            }

            let level = ev.next_val != 0;
            let rising = !self.simulator.clk_level && level;
            self.simulator.clk_level = level;
            if rising {
                self.simulator.tick();
            }

            // High phase is the shorter half of an odd period.
            if let Some(period) = self.scheduler.clock.as_ref().map(|def| def.period) {
                let half = if level { period / 2 } else { period - period / 2 };
                self.scheduler
                    .push(current_time + half, ev.signal, u64::from(!level));
            }
        }

        self.dump(current_time)?;
        Ok(Some(current_time))
    }

    /// Advance time and run until `end_time` (inclusive).
    pub fn run_until(&mut self, end_time: u64) -> Result<(), SimulatorError> {
        while let Some(next_time) = self.scheduler.next_event_time() {
            if next_time > end_time {
                break;
            }
            self.step()?;
        }
        self.scheduler.time = end_time;
        self.dump(end_time)?;
        Ok(())
    }

    /// Runs until `count` more rising edges have been evaluated, stopping
    /// right after the last one.
    pub fn run_cycles(&mut self, count: u64) -> Result<(), SimulatorError> {
        if self.scheduler.clock.is_none() {
            return Err(SimulatorError::NoClock);
        }
        let target = self.simulator.cycles + count;
        while self.simulator.cycles < target {
            if self.step()?.is_none() {
                return Err(SimulatorError::NoClock);
            }
        }
        Ok(())
    }

    /// Returns the current simulation time.
    pub fn time(&self) -> u64 {
        self.scheduler.time
    }

    /// Returns the time of the next scheduled event, if any.
    pub fn next_event_time(&self) -> Option<u64> {
        self.scheduler.next_event_time()
    }

    /// Rising edges evaluated so far.
    pub fn cycles(&self) -> u64 {
        self.simulator.cycles
    }
}
