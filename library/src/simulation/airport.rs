// Discrete-time runway simulation.
//
// Each step: random arrivals join one of two FIFO queues, then up to `runways`
// planes land, and take-offs use whatever runways are still free.
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info};

const FLIGHT_DIGITS: &[u8] = b"ABCEFGHJKLMNPRTUWXY2346789";
const FLIGHT_LEN: usize = 5;

#[derive(Clone, Debug)]
pub struct AirportConfig {
    pub runways: usize,
    pub max_arrivals_per_step: usize,
    /// Chance in percent that a new plane wants to land rather than take off
    pub land_percent: u32,
    pub minutes_per_step: i64,
    pub start: NaiveDateTime,
}

impl Default for AirportConfig {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2021, 10, 7)
            .and_then(|d| d.and_hms_opt(22, 0, 0))
            .unwrap_or_default();
        Self {
            runways: 2,
            max_arrivals_per_step: 4,
            land_percent: 50,
            minutes_per_step: 5,
            start,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Airplane {
    pub flight: String,
    pub wants_to_land: bool,
    pub arrived_at: u64,
}

impl Airplane {
    pub fn random(rng: &mut impl Rng, land_percent: u32, step: u64) -> Self {
        let flight = (0..FLIGHT_LEN)
            .map(|_| FLIGHT_DIGITS[rng.gen_range(0..FLIGHT_DIGITS.len())] as char)
            .collect();
        Self {
            flight,
            wants_to_land: rng.gen_range(0..100) < land_percent,
            arrived_at: step,
        }
    }
}

/// What changed during one step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub step: u64,
    pub time: NaiveDateTime,
    pub new_arrivals: Vec<String>,
    pub waiting_to_land: usize,
    pub landed: Vec<String>,
    pub new_departures: Vec<String>,
    pub waiting_to_take_off: usize,
    pub took_off: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub time: NaiveDateTime,
    pub landed: u64,
    pub avg_wait_to_land: Option<TimeDelta>,
    pub took_off: u64,
    pub avg_wait_to_take_off: Option<TimeDelta>,
}

#[derive(Default)]
struct Totals {
    done: u64,
    wait_steps: u64,
}

pub struct Airport<R> {
    cfg: AirportConfig,
    rng: R,
    landing: VecDeque<Airplane>,
    take_off: VecDeque<Airplane>,
    step: u64,
    landed: Totals,
    took_off: Totals,
}

impl Airport<StdRng> {
    pub fn seeded(cfg: AirportConfig, seed: u64) -> Self {
        Self::new(cfg, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Airport<R> {
    pub fn new(cfg: AirportConfig, rng: R) -> Self {
        Self {
            cfg,
            rng,
            landing: VecDeque::new(),
            take_off: VecDeque::new(),
            step: 0,
            landed: Totals::default(),
            took_off: Totals::default(),
        }
    }

    /// Wall-clock time of `step`. Saturates at `NaiveDateTime::MAX`.
    pub fn time_at(&self, step: u64) -> NaiveDateTime {
        i64::try_from(step)
            .ok()
            .and_then(|step| self.cfg.minutes_per_step.checked_mul(step))
            .and_then(TimeDelta::try_minutes)
            .and_then(|d| self.cfg.start.checked_add_signed(d))
            .unwrap_or(NaiveDateTime::MAX)
    }

    pub fn queue_lens(&self) -> (usize, usize) {
        (self.landing.len(), self.take_off.len())
    }

    /// Puts a plane at the back of its queue.
    pub fn admit(&mut self, plane: Airplane) {
        if plane.wants_to_land {
            self.landing.push_back(plane);
        } else {
            self.take_off.push_back(plane);
        }
    }

    pub fn step(&mut self) -> StepReport {
        let step = self.step;
        let mut report = StepReport {
            step,
            time: self.time_at(step),
            ..Default::default()
        };

        let arrivals = self.rng.gen_range(0..=self.cfg.max_arrivals_per_step);
        for _ in 0..arrivals {
            let plane = Airplane::random(&mut self.rng, self.cfg.land_percent, step);
            if plane.wants_to_land {
                report.new_arrivals.push(plane.flight.clone());
            } else {
                report.new_departures.push(plane.flight.clone());
            }
            self.admit(plane);
        }

        // Landings go first; take-offs get the runways left over.
        let mut in_use = 0;
        while in_use < self.cfg.runways {
            let Some(plane) = self.landing.pop_front() else {
                break;
            };
            in_use += 1;
            self.landed.done += 1;
            self.landed.wait_steps += step.saturating_sub(plane.arrived_at);
            report.landed.push(plane.flight);
        }
        while in_use < self.cfg.runways {
            let Some(plane) = self.take_off.pop_front() else {
                break;
            };
            in_use += 1;
            self.took_off.done += 1;
            self.took_off.wait_steps += step.saturating_sub(plane.arrived_at);
            report.took_off.push(plane.flight);
        }

        report.waiting_to_land = self.landing.len();
        report.waiting_to_take_off = self.take_off.len();
        debug!(
            step,
            arrivals,
            landed = report.landed.len(),
            took_off = report.took_off.len(),
            "airport step"
        );
        self.step += 1;
        report
    }

    fn avg_wait(&self, totals: &Totals) -> Option<TimeDelta> {
        if totals.done == 0 {
            return None;
        }
        let micros = totals.wait_steps as i128 * self.cfg.minutes_per_step as i128 * 60_000_000
            / totals.done as i128;
        Some(TimeDelta::microseconds(i64::try_from(micros).unwrap_or(i64::MAX)))
    }

    /// Totals so far, stamped with the time of the last completed step.
    pub fn summary(&self) -> Summary {
        Summary {
            time: self.time_at(self.step.saturating_sub(1)),
            landed: self.landed.done,
            avg_wait_to_land: self.avg_wait(&self.landed),
            took_off: self.took_off.done,
            avg_wait_to_take_off: self.avg_wait(&self.took_off),
        }
    }

    pub fn run(&mut self, steps: u64, mut on_step: impl FnMut(&StepReport)) -> Summary {
        for _ in 0..steps {
            let report = self.step();
            on_step(&report);
        }
        let summary = self.summary();
        info!(
            steps,
            landed = summary.landed,
            took_off = summary.took_off,
            "simulation finished"
        );
        summary
    }
}

struct Hms(TimeDelta);

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.num_seconds();
        write!(f, "{}:{:02}:{:02}", s / 3600, s / 60 % 60, s % 60)?;
        let micros = (self.0 - TimeDelta::seconds(s)).num_microseconds().unwrap_or(0);
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        Ok(())
    }
}

struct Wait(Option<TimeDelta>);

impl fmt::Display for Wait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => write!(f, "{}", Hms(d)),
            None => write!(f, "n/a"),
        }
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time: {}", self.time)?;
        writeln!(f, "new arrival: {:?}", self.new_arrivals)?;
        writeln!(f, "total waiting to land: {}", self.waiting_to_land)?;
        writeln!(f, "newly landed: {:?}", self.landed)?;
        writeln!(f, "new departure: {:?}", self.new_departures)?;
        writeln!(f, "total waiting to take off: {}", self.waiting_to_take_off)?;
        write!(f, "newly done takeoff: {:?}", self.took_off)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time: {}", self.time)?;
        writeln!(f, "Total done landing: {}", self.landed)?;
        writeln!(f, "Avg time waiting to land: {}", Wait(self.avg_wait_to_land))?;
        writeln!(f, "Total done takeoff: {}", self.took_off)?;
        write!(
            f,
            "Avg time waiting to take off: {}",
            Wait(self.avg_wait_to_take_off)
        )
    }
}
