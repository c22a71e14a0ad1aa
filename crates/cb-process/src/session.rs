//! Latest-duty cell for callers that size the refrigerant after a separate
//! duty step.
//!
//! [`refrigerant_flow`](crate::refrigerant_flow) takes the duty explicitly and is
//! the primary API. `DutySession` serves interactive front ends where the two
//! calculations are triggered independently: duty writes go through one lock,
//! sizing reads see the most recent write, and nothing ever clears it.

use crate::error::{ProcessError, ProcessResult};
use crate::heat_duty::{HeatDutyInput, HeatDutyResult, heat_duty};
use crate::refrigerant::{RefrigerantSizing, refrigerant_flow};
use cb_fluids::EnthalpyModel;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
pub struct DutySession {
    latest: RwLock<Option<HeatDutyResult>>,
}

impl DutySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute a duty and make it the session's current value.
    pub fn compute_duty(
        &self,
        model: &dyn EnthalpyModel,
        input: &HeatDutyInput,
    ) -> ProcessResult<HeatDutyResult> {
        let result = heat_duty(model, input)?;
        self.record(result.clone());
        Ok(result)
    }

    /// Replace the current duty.
    pub fn record(&self, result: HeatDutyResult) {
        debug!(duty = result.duty_btu_per_hr, "recording heat duty");
        let mut slot = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(result);
    }

    /// Most recent duty [Btu/hr], if any.
    pub fn latest_duty(&self) -> Option<f64> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|r| r.duty_btu_per_hr)
    }

    /// Copy of the most recent full result, if any.
    pub fn latest(&self) -> Option<HeatDutyResult> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Size the model table's refrigerant against the current duty.
    pub fn size_refrigerant(
        &self,
        model: &dyn EnthalpyModel,
        t_in_r: f64,
    ) -> ProcessResult<RefrigerantSizing> {
        let duty = self.latest_duty().ok_or(ProcessError::DutyNotYetComputed)?;
        refrigerant_flow(model.table(), duty, t_in_r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_fluids::{Composition, PengRobinson};

    fn input(t_out_r: f64) -> HeatDutyInput {
        HeatDutyInput {
            mass_flow_lb_per_hr: 100_000.0,
            t_in_r: 559.67,
            t_out_r,
            p_psia: 500.0,
            composition: Composition::pure("Methane"),
        }
    }

    #[test]
    fn sizing_before_duty_fails() {
        let model = PengRobinson::standard();
        let session = DutySession::new();
        assert_eq!(session.latest_duty(), None);
        assert_eq!(
            session.size_refrigerant(&model, 419.67).unwrap_err(),
            ProcessError::DutyNotYetComputed
        );
    }

    #[test]
    fn sizing_uses_latest_duty() {
        let model = PengRobinson::standard();
        let session = DutySession::new();

        let first = session.compute_duty(&model, &input(419.67)).unwrap();
        let sized_first = session.size_refrigerant(&model, 419.67).unwrap();
        assert_eq!(
            sized_first.heat_absorbed_btu_per_hr,
            first.duty_btu_per_hr.abs()
        );

        // a later duty silently replaces the earlier one
        let second = session.compute_duty(&model, &input(500.0)).unwrap();
        let sized_second = session.size_refrigerant(&model, 419.67).unwrap();
        assert_eq!(session.latest_duty(), Some(second.duty_btu_per_hr));
        assert!(sized_second.mass_flow_lb_per_hr < sized_first.mass_flow_lb_per_hr);
    }

    #[test]
    fn failed_duty_keeps_previous_value() {
        let model = PengRobinson::standard();
        let session = DutySession::new();
        let ok = session.compute_duty(&model, &input(419.67)).unwrap();

        let mut bad = input(419.67);
        bad.composition = Composition::pure("Xenon");
        assert!(session.compute_duty(&model, &bad).is_err());
        assert_eq!(session.latest_duty(), Some(ok.duty_btu_per_hr));
        assert_eq!(session.latest(), Some(ok));
    }

    #[test]
    fn session_is_shareable_across_threads() {
        let model = PengRobinson::standard();
        let session = std::sync::Arc::new(DutySession::new());
        session.compute_duty(&model, &input(419.67)).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = session.clone();
                std::thread::spawn(move || session.latest_duty())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().is_some());
        }
    }
}
