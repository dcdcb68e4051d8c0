//! Host-side plant simulation for closed-loop tests.
//!
//! A lumped first-order model of the water tank: the heating element adds a
//! fixed power while the valve servo sits at the ON position, and the tank
//! loses heat to the room proportionally to the temperature difference.
//! [`SimThermocouple`] and [`SimServo`] are handles onto the same tank, so
//! the thermostat can run closed-loop on the host.

use std::cell::RefCell;
use std::rc::Rc;

use thermostat::app::ports::{ActuatorPort, TemperaturePort, TemperatureReading};
use thermostat::config::SERVO_HEATER_ON_POS;

/// Physical parameters of the simulated tank.
#[derive(Debug, Clone, Copy)]
pub struct TankParams {
    /// Room temperature (°C).
    pub ambient_c: f64,
    /// Temperature rise per second with the element on and no losses (°C/s).
    pub heating_rate_c_per_s: f64,
    /// Fraction of the tank–room difference lost per second.
    pub loss_per_s: f64,
}

impl Default for TankParams {
    fn default() -> Self {
        Self {
            ambient_c: 20.0,
            heating_rate_c_per_s: 2.0,
            loss_per_s: 0.005,
        }
    }
}

#[derive(Debug)]
struct TankState {
    params: TankParams,
    water_c: f64,
    valve_pos: u8,
    attached: bool,
    servo_writes: u32,
    sensor_fault: bool,
    noise: Option<NoiseSource>,
}

/// Deterministic spike injector: every `period`-th read is replaced by
/// `spike_c`.
#[derive(Debug, Clone, Copy)]
struct NoiseSource {
    period: u32,
    spike_c: f64,
    reads: u32,
}

/// The simulated tank.  Clone handles share the same state.
#[derive(Debug, Clone)]
pub struct WaterTank {
    state: Rc<RefCell<TankState>>,
}

impl WaterTank {
    pub fn new(initial_c: f64, params: TankParams) -> Self {
        Self {
            state: Rc::new(RefCell::new(TankState {
                params,
                water_c: initial_c,
                valve_pos: 0,
                attached: false,
                servo_writes: 0,
                sensor_fault: false,
                noise: None,
            })),
        }
    }

    /// Thermocouple probing this tank.
    pub fn thermocouple(&self) -> SimThermocouple {
        SimThermocouple {
            state: Rc::clone(&self.state),
        }
    }

    /// Servo on this tank's heater valve.
    pub fn servo(&self) -> SimServo {
        SimServo {
            state: Rc::clone(&self.state),
        }
    }

    /// Integrate the model forward by `dt_ms`.
    pub fn advance(&self, dt_ms: u64) {
        let mut s = self.state.borrow_mut();
        let dt = dt_ms as f64 / 1000.0;
        let heating = if s.valve_pos == SERVO_HEATER_ON_POS {
            s.params.heating_rate_c_per_s
        } else {
            0.0
        };
        let loss = s.params.loss_per_s * (s.water_c - s.params.ambient_c);
        s.water_c += (heating - loss) * dt;
    }

    pub fn water_c(&self) -> f64 {
        self.state.borrow().water_c
    }

    pub fn element_on(&self) -> bool {
        self.state.borrow().valve_pos == SERVO_HEATER_ON_POS
    }

    pub fn servo_writes(&self) -> u32 {
        self.state.borrow().servo_writes
    }

    pub fn servo_attached(&self) -> bool {
        self.state.borrow().attached
    }

    /// Make every following read report a converter fault.
    pub fn set_sensor_fault(&self, fault: bool) {
        self.state.borrow_mut().sensor_fault = fault;
    }

    /// Replace every `period`-th reading with `spike_c`.
    pub fn inject_spikes(&self, period: u32, spike_c: f64) {
        self.state.borrow_mut().noise = (period > 0).then_some(NoiseSource {
            period,
            spike_c,
            reads: 0,
        });
    }
}

pub struct SimThermocouple {
    state: Rc<RefCell<TankState>>,
}

impl TemperaturePort for SimThermocouple {
    fn read(&mut self) -> TemperatureReading {
        let mut s = self.state.borrow_mut();
        let mut celsius = s.water_c;
        if let Some(noise) = s.noise.as_mut() {
            noise.reads = noise.reads.wrapping_add(1);
            if noise.reads % noise.period == 0 {
                celsius = noise.spike_c;
            }
        }
        TemperatureReading {
            celsius,
            fault: s.sensor_fault,
        }
    }
}

pub struct SimServo {
    state: Rc<RefCell<TankState>>,
}

impl ActuatorPort for SimServo {
    fn write(&mut self, position: u8) {
        let mut s = self.state.borrow_mut();
        s.servo_writes += 1;
        // A detached hobby servo ignores pulses.
        if s.attached {
            s.valve_pos = position;
        }
    }

    fn attach(&mut self) {
        self.state.borrow_mut().attached = true;
    }

    fn detach(&mut self) {
        self.state.borrow_mut().attached = false;
    }

    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }
}

// ── Plant self-checks ─────────────────────────────────────────

#[test]
fn tank_heats_with_valve_open_and_cools_without() {
    let tank = WaterTank::new(100.0, TankParams::default());
    let mut servo = tank.servo();
    servo.attach();
    servo.write(SERVO_HEATER_ON_POS);
    tank.advance(10_000);
    let heated = tank.water_c();
    assert!(heated > 100.0);

    servo.write(0);
    tank.advance(10_000);
    assert!(tank.water_c() < heated);
}

#[test]
fn detached_servo_does_not_move_valve() {
    let tank = WaterTank::new(100.0, TankParams::default());
    let mut servo = tank.servo();
    servo.write(SERVO_HEATER_ON_POS);
    assert!(!tank.element_on());
    assert_eq!(tank.servo_writes(), 1);
}

#[test]
fn spikes_replace_periodic_reads() {
    let tank = WaterTank::new(100.0, TankParams::default());
    tank.inject_spikes(3, 999.0);
    let mut tc = tank.thermocouple();
    let reads: Vec<f64> = (0..6).map(|_| tc.read().celsius).collect();
    assert_eq!(reads, vec![100.0, 100.0, 999.0, 100.0, 100.0, 999.0]);
}
