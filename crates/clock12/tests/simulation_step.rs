use clock12::{Simulation, SimulatorError};

#[test]
fn test_simulation_step() {
    let mut vsim = Simulation::builder().divider_wrap(1_000).build().unwrap();
    vsim.add_clock(10, 0).unwrap(); // period 10, delay 0
    let ena = vsim.signal("ena").unwrap();
    let rst_n = vsim.signal("rst_n").unwrap();
    let clk = vsim.signal("clk").unwrap();
    let clk_div = vsim.signal("clk_div").unwrap();

    vsim.modify(|io| {
        io.set(ena, 1u8)?;
        io.set(rst_n, 1u8)
    })
    .unwrap();

    // Step 0: clk 0 -> 1 at t=0.
    assert_eq!(vsim.step().unwrap(), Some(0));
    assert_eq!(vsim.get(clk), 1);
    let val0 = vsim.get(clk_div);

    // Step 1: clk 1 -> 0 at t=5, no evaluation
    assert_eq!(vsim.step().unwrap(), Some(5));
    assert_eq!(vsim.get(clk), 0);
    assert_eq!(vsim.get(clk_div), val0);

    // Step 2: clk 0 -> 1 at t=10
    assert_eq!(vsim.step().unwrap(), Some(10));
    assert_eq!(vsim.time(), 10);
    assert_eq!(vsim.get(clk_div), val0 + 1);
    assert_eq!(vsim.cycles(), 2);
}

#[test]
fn test_next_event_time() {
    let mut vsim = Simulation::builder().build().unwrap();
    assert_eq!(vsim.next_event_time(), None);
    assert_eq!(vsim.step().unwrap(), None);

    vsim.add_clock(100, 0).unwrap();
    assert_eq!(vsim.next_event_time(), Some(0));
    vsim.step().unwrap();
    assert_eq!(vsim.next_event_time(), Some(50));
    vsim.step().unwrap();
    assert_eq!(vsim.next_event_time(), Some(100));
}

#[test]
fn test_scheduled_release_is_seen_by_the_same_edge() {
    let mut vsim = Simulation::builder().divider_wrap(1_000).build().unwrap();
    vsim.add_clock(100, 0).unwrap();
    let clk_div = vsim.signal("clk_div").unwrap();

    vsim.schedule("ena", 0, 1).unwrap();
    vsim.schedule("rst_n", 500, 1).unwrap();

    vsim.run_until(400).unwrap();
    assert_eq!(vsim.get(clk_div), 0);

    // Rising edges at 500, 600, 700.
    vsim.run_until(700).unwrap();
    assert_eq!(vsim.get(clk_div), 3);
    assert_eq!(vsim.time(), 700);
}

#[test]
fn test_run_cycles_stops_after_rising_edge() {
    let mut vsim = Simulation::builder().build().unwrap();
    vsim.add_clock(100, 30).unwrap();
    vsim.run_cycles(3).unwrap();
    assert_eq!(vsim.cycles(), 3);
    assert_eq!(vsim.time(), 230);
}

#[test]
fn test_redefined_clock_replaces_old_edges() {
    let mut vsim = Simulation::builder().build().unwrap();
    vsim.add_clock(100, 0).unwrap();
    vsim.add_clock(20, 5).unwrap();
    vsim.run_until(45).unwrap();
    // Rising edges at 5, 25 and 45 only.
    assert_eq!(vsim.cycles(), 3);
}

#[test]
fn test_redefined_clock_while_high_keeps_first_edge() {
    let mut vsim = Simulation::builder().build().unwrap();
    let clk = vsim.signal("clk").unwrap();
    vsim.add_clock(100, 0).unwrap();
    vsim.run_cycles(1).unwrap();
    assert_eq!(vsim.get(clk), 1);

    vsim.add_clock(100, 10).unwrap();
    assert_eq!(vsim.get(clk), 0);
    vsim.run_until(10).unwrap();
    assert_eq!(vsim.cycles(), 2);
    assert_eq!(vsim.get(clk), 1);
}

#[test]
fn test_redefined_clock_never_starts_in_the_past() {
    let mut vsim = Simulation::builder().build().unwrap();
    vsim.add_clock(100, 0).unwrap();
    vsim.run_until(250).unwrap();
    vsim.add_clock(100, 30).unwrap();
    assert_eq!(vsim.next_event_time(), Some(250));
}

#[test]
fn test_odd_period_keeps_its_length() {
    let mut vsim = Simulation::builder().build().unwrap();
    vsim.add_clock(333, 0).unwrap();
    assert_eq!(vsim.step().unwrap(), Some(0));
    assert_eq!(vsim.step().unwrap(), Some(166));
    assert_eq!(vsim.step().unwrap(), Some(333));
    vsim.run_cycles(9).unwrap();
    assert_eq!(vsim.time(), 3330);
}

#[test]
fn test_schedule_rejects_past_times() {
    let mut vsim = Simulation::builder().build().unwrap();
    vsim.add_clock(100, 0).unwrap();
    vsim.run_until(500).unwrap();
    assert!(matches!(
        vsim.schedule("ena", 100, 1),
        Err(SimulatorError::ScheduleInPast { time: 100, now: 500 })
    ));
    vsim.schedule("ena", 500, 1).unwrap();
    vsim.step().unwrap();
    assert_eq!(vsim.time(), 500);
}

#[test]
fn test_run_cycles_without_clock() {
    let mut vsim = Simulation::builder().build().unwrap();
    assert!(matches!(vsim.run_cycles(1), Err(SimulatorError::NoClock)));
}

#[test]
fn test_clock_period_too_short() {
    let mut vsim = Simulation::builder().build().unwrap();
    assert!(matches!(
        vsim.add_clock(1, 0),
        Err(SimulatorError::InvalidClockPeriod(1))
    ));
}

#[test]
fn test_schedule_rejects_outputs_and_clock() {
    let mut vsim = Simulation::builder().build().unwrap();
    assert!(matches!(
        vsim.schedule("uo_out", 10, 1),
        Err(SimulatorError::NotAnInput(_))
    ));
    assert!(matches!(
        vsim.schedule("clk", 10, 1),
        Err(SimulatorError::NotAnInput(_))
    ));
    assert!(matches!(
        vsim.schedule("nope", 10, 1),
        Err(SimulatorError::UnknownSignal(_))
    ));
}
