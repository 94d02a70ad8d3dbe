//! Medical Service

use crate::MonitorError;
use alerting::AlertSender;
use patient_store::PatientLookup;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vitals::{evaluator, BloodPressure, Decimal, Observation, VitalKind};

/// Result of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Observation matched the baseline, nothing was sent
    Normal,
    /// Observation deviated and one alert was sent
    Alerted,
}

impl CheckOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::Normal => "normal",
            CheckOutcome::Alerted => "alerted",
        }
    }
}

/// Alert text for a patient
pub fn alert_message(patient_id: &str) -> String {
    format!("Warning, patient with id: {}, need help", patient_id)
}

/// Checks observations against patient baselines
pub struct MedicalService<P, A> {
    patients: P,
    alerts: A,
}

impl<P: PatientLookup, A: AlertSender> MedicalService<P, A> {
    pub fn new(patients: P, alerts: A) -> Self {
        Self { patients, alerts }
    }

    /// Compare a blood pressure reading with the patient's baseline
    pub fn check_blood_pressure(
        &self,
        patient_id: &str,
        observed: BloodPressure,
    ) -> Result<CheckOutcome, MonitorError> {
        let profile = self.patients.get_by_id(patient_id)?;
        let baseline = profile.health().blood_pressure;
        let normal = evaluator::is_blood_pressure_normal(baseline, observed);
        debug!(
            "Blood pressure for {}: observed {} baseline {} normal={}",
            patient_id, observed, baseline, normal
        );
        self.conclude(patient_id, VitalKind::BloodPressure, normal)
    }

    /// Compare a temperature reading with the patient's baseline
    pub fn check_temperature(
        &self,
        patient_id: &str,
        observed: Decimal,
    ) -> Result<CheckOutcome, MonitorError> {
        let profile = self.patients.get_by_id(patient_id)?;
        let baseline = profile.health().normal_temperature;
        let normal = evaluator::is_temperature_normal(baseline, observed);
        debug!(
            "Temperature for {}: observed {} baseline {} normal={}",
            patient_id, observed, baseline, normal
        );
        self.conclude(patient_id, VitalKind::Temperature, normal)
    }

    /// Check any observation against the baseline of its own kind
    pub fn check(
        &self,
        patient_id: &str,
        observation: &Observation,
    ) -> Result<CheckOutcome, MonitorError> {
        match *observation {
            Observation::BloodPressure(observed) => self.check_blood_pressure(patient_id, observed),
            Observation::Temperature { value } => self.check_temperature(patient_id, value),
        }
    }

    fn conclude(
        &self,
        patient_id: &str,
        kind: VitalKind,
        normal: bool,
    ) -> Result<CheckOutcome, MonitorError> {
        if normal {
            return Ok(CheckOutcome::Normal);
        }

        self.alerts.send(&alert_message(patient_id))?;
        info!("Abnormal {} for patient {}, alert sent", kind, patient_id);
        Ok(CheckOutcome::Alerted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{AlertError, RecordingAlertSender};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use patient_store::{InMemoryRepository, StorageError};
    use std::sync::Arc;
    use vitals::{HealthBaseline, PatientProfile};

    const ALERT: &str = "Warning, patient with id: test, need help";

    fn profile(temperature: Decimal, pressure: BloodPressure) -> PatientProfile {
        PatientProfile::new(
            "test",
            "Ivan",
            "Petrov",
            NaiveDate::from_ymd_opt(1980, 11, 26).unwrap(),
            HealthBaseline::new(temperature, pressure),
        )
    }

    fn service(
        temperature: Decimal,
        pressure: BloodPressure,
    ) -> (
        MedicalService<InMemoryRepository, Arc<RecordingAlertSender>>,
        Arc<RecordingAlertSender>,
    ) {
        let repo = InMemoryRepository::with_profiles([profile(temperature, pressure)]);
        let alerts = Arc::new(RecordingAlertSender::new());
        (MedicalService::new(repo, alerts.clone()), alerts)
    }

    struct FailingSender;

    impl AlertSender for FailingSender {
        fn send(&self, _message: &str) -> Result<(), AlertError> {
            Err(AlertError::Publish("broker down".to_string()))
        }
    }

    #[test]
    fn test_alert_message_format() {
        assert_eq!(alert_message("test"), ALERT);
        assert_eq!(
            alert_message("a1b2"),
            "Warning, patient with id: a1b2, need help"
        );
    }

    #[test]
    fn test_blood_pressure_abnormal_sends_alert() {
        let (service, alerts) = service(dec!(36.6), BloodPressure::new(4, -1));

        let outcome = service
            .check_blood_pressure("test", BloodPressure::new(2, 0))
            .unwrap();

        assert_eq!(outcome, CheckOutcome::Alerted);
        assert_eq!(alerts.messages(), vec![ALERT]);
    }

    #[test]
    fn test_blood_pressure_normal_is_silent() {
        let (service, alerts) = service(dec!(36.6), BloodPressure::new(2, 0));

        let outcome = service
            .check_blood_pressure("test", BloodPressure::new(2, 0))
            .unwrap();

        assert_eq!(outcome, CheckOutcome::Normal);
        assert_eq!(alerts.count(), 0);
    }

    #[test]
    fn test_temperature_abnormal_sends_alert() {
        let (service, alerts) = service(dec!(22.0), BloodPressure::new(120, 80));

        let outcome = service.check_temperature("test", dec!(20.0)).unwrap();

        assert_eq!(outcome, CheckOutcome::Alerted);
        assert_eq!(alerts.messages(), vec![ALERT]);
    }

    #[test]
    fn test_temperature_normal_is_silent() {
        let (service, alerts) = service(dec!(20.0), BloodPressure::new(120, 80));

        let outcome = service.check_temperature("test", dec!(20.0)).unwrap();

        assert_eq!(outcome, CheckOutcome::Normal);
        assert_eq!(alerts.count(), 0);
    }

    #[test]
    fn test_temperature_on_tolerance_edge_is_silent() {
        let (service, alerts) = service(dec!(36.6), BloodPressure::new(120, 80));

        assert_eq!(
            service.check_temperature("test", dec!(38.1)).unwrap(),
            CheckOutcome::Normal
        );
        assert_eq!(alerts.count(), 0);
    }

    #[test]
    fn test_temperature_just_past_tolerance_alerts() {
        let (service, alerts) = service(dec!(20.0), BloodPressure::new(120, 80));

        assert_eq!(
            service.check_temperature("test", dec!(21.5000000005)).unwrap(),
            CheckOutcome::Alerted
        );
        assert_eq!(alerts.messages(), vec![ALERT]);
    }

    #[test]
    fn test_repeated_checks_are_idempotent() {
        let (service, alerts) = service(dec!(22.0), BloodPressure::new(4, -1));

        for _ in 0..3 {
            assert_eq!(
                service.check_temperature("test", dec!(20.0)).unwrap(),
                CheckOutcome::Alerted
            );
            assert_eq!(
                service.check_temperature("test", dec!(22.5)).unwrap(),
                CheckOutcome::Normal
            );
        }
        // One alert per abnormal call, no suppression or accumulation
        assert_eq!(alerts.count(), 3);
        assert!(alerts.messages().iter().all(|m| m == ALERT));
    }

    #[test]
    fn test_check_dispatches_by_kind() {
        let (service, alerts) = service(dec!(36.6), BloodPressure::new(120, 80));

        assert_eq!(
            service
                .check("test", &BloodPressure::new(120, 80).into())
                .unwrap(),
            CheckOutcome::Normal
        );
        assert_eq!(
            service
                .check("test", &Observation::temperature(dec!(36.6)))
                .unwrap(),
            CheckOutcome::Normal
        );
        assert_eq!(
            service
                .check("test", &BloodPressure::new(140, 90).into())
                .unwrap(),
            CheckOutcome::Alerted
        );
        assert_eq!(alerts.count(), 1);
    }

    #[test]
    fn test_unknown_patient_propagates_lookup_error() {
        let (service, alerts) = service(dec!(36.6), BloodPressure::new(120, 80));

        let err = service
            .check_blood_pressure("missing", BloodPressure::new(1, 1))
            .unwrap_err();

        match err {
            MonitorError::Lookup(StorageError::NotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(alerts.count(), 0);
    }

    #[test]
    fn test_delivery_failure_propagates() {
        let repo = InMemoryRepository::with_profiles([profile(dec!(22.0), BloodPressure::new(4, -1))]);
        let service = MedicalService::new(repo, FailingSender);

        let err = service.check_temperature("test", dec!(20.0)).unwrap_err();
        assert!(matches!(err, MonitorError::Delivery(AlertError::Publish(_))));
        assert_eq!(err.to_string(), "Publish failed: broker down");

        // Normal readings never reach the sender
        assert_eq!(
            service.check_temperature("test", dec!(22.0)).unwrap(),
            CheckOutcome::Normal
        );
    }

    #[test]
    fn test_works_with_trait_objects() {
        let repo: Arc<dyn PatientLookup> = Arc::new(InMemoryRepository::with_profiles([
            profile(dec!(36.6), BloodPressure::new(120, 80)),
        ]));
        let recorder = Arc::new(RecordingAlertSender::new());
        let alerts: Arc<dyn AlertSender> = recorder.clone();
        let service = MedicalService::new(repo, alerts);

        service
            .check_blood_pressure("test", BloodPressure::new(121, 80))
            .unwrap();
        assert_eq!(recorder.messages(), vec![ALERT]);
    }
}
