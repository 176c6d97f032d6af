//! End-to-end behaviour of the cascade controller against a scripted
//! lookup service and an in-memory page.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp, missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use modlog_cascade::controller::{CascadeController, StepOutcome};
use modlog_cascade::error::CascadeError;
use modlog_cascade::host::MemoryPage;
use modlog_common::config::FieldBindings;
use modlog_common::types::{CascadeField, Drivetrain, DrivetrainFallback};
use modlog_lookup::error::LookupFailure;
use modlog_lookup::models::{MakeRecord, ModelRecord, SpecRecord, YearRange};
use modlog_lookup::{LookupCommand, LookupService};
use tokio::sync::Semaphore;

// ── Scripted lookup ──────────────────────────────────────────────────

#[derive(Default)]
struct ScriptedLookup {
    makes: HashMap<String, Vec<MakeRecord>>,
    models: HashMap<(String, String), Vec<ModelRecord>>,
    trims: HashMap<(String, String, String), Vec<SpecRecord>>,
    make_gates: HashMap<String, Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl ScriptedLookup {
    fn catalog() -> Self {
        let mut lookup = Self::default();
        let _ = lookup.makes.insert(
            "2020".into(),
            vec![
                make("ac", false),
                make("acura", true),
                make("alpina", false),
                make("honda", true),
            ],
        );
        let _ = lookup
            .makes
            .insert("2019".into(), vec![make("saab", false), make("volvo", true)]);
        let _ = lookup.models.insert(
            ("2020".into(), "honda".into()),
            vec![model("Civic"), model("Accord")],
        );
        let _ = lookup.models.insert(("2020".into(), "acura".into()), vec![model("MDX")]);
        let _ = lookup.trims.insert(
            ("2020".into(), "honda".into(), "Civic".into()),
            vec![civic_si(), civic_base()],
        );
        lookup
    }

    fn gate_makes(mut self, year: &str, gate: Arc<Semaphore>) -> Self {
        let _ = self.make_gates.insert(year.to_string(), gate);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LookupService for ScriptedLookup {
    async fn years(&self) -> Result<YearRange, LookupFailure> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(YearRange {
            min_year: 2018,
            max_year: 2020,
        })
    }

    async fn makes(&self, year: &str) -> Result<Vec<MakeRecord>, LookupFailure> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = self.make_gates.get(year) {
            let _permit = gate.acquire().await.expect("gate closed");
        }
        self.makes.get(year).cloned().ok_or(LookupFailure::Empty {
            command: LookupCommand::GetMakes,
        })
    }

    async fn models(&self, year: &str, make: &str) -> Result<Vec<ModelRecord>, LookupFailure> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        if make == "broken" {
            return Err(LookupFailure::Network {
                command: LookupCommand::GetModels,
                message: "connection reset".into(),
            });
        }
        self.models
            .get(&(year.to_string(), make.to_string()))
            .cloned()
            .ok_or(LookupFailure::Empty {
                command: LookupCommand::GetModels,
            })
    }

    async fn trims(
        &self,
        year: &str,
        make: &str,
        model: &str,
    ) -> Result<Vec<SpecRecord>, LookupFailure> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        self.trims
            .get(&(year.to_string(), make.to_string(), model.to_string()))
            .cloned()
            .ok_or(LookupFailure::Empty {
                command: LookupCommand::GetTrims,
            })
    }
}

fn make(id: &str, common: bool) -> MakeRecord {
    MakeRecord {
        make_id: id.into(),
        make_display: id.to_uppercase(),
        make_is_common: common,
        make_country: None,
    }
}

fn model(name: &str) -> ModelRecord {
    ModelRecord {
        model_name: name.into(),
        model_make_id: Some("honda".into()),
    }
}

fn civic_si() -> SpecRecord {
    let mut record = SpecRecord::new("1001");
    record.model_year = "2020".into();
    record.model_make_display = "Honda".into();
    record.model_name = "Civic".into();
    record.model_trim = Some("Si".into());
    record.model_engine_power_ps = Some(200.0);
    record.model_engine_torque_nm = Some(300.0);
    record.model_weight_kg = Some(1500.0);
    record.model_engine_cc = Some(1998.0);
    record.model_drive = Some("Front Wheel Drive".into());
    record
}

fn civic_base() -> SpecRecord {
    let mut record = SpecRecord::new("1002");
    record.model_year = "2020".into();
    record.model_make_display = "Honda".into();
    record.model_name = "Civic".into();
    record.model_drive = Some("Unknown".into());
    record
}

type Controller = CascadeController<ScriptedLookup, MemoryPage>;

fn controller_with(lookup: ScriptedLookup, fallback: DrivetrainFallback) -> Controller {
    CascadeController::new(lookup, MemoryPage::new(), FieldBindings::default(), fallback)
}

async fn ready_controller() -> Controller {
    let controller = controller_with(ScriptedLookup::catalog(), DrivetrainFallback::Fwd);
    let _ = controller.initialize().await.expect("initialize");
    controller
}

async fn select_civic(controller: &Controller) {
    let _ = controller.select_year(Some("2020")).await.expect("year");
    let _ = controller.select_make(Some("honda")).await.expect("make");
    let _ = controller.select_model(Some("Civic")).await.expect("model");
}

fn page_values(controller: &Controller, element: &str) -> Vec<String> {
    controller.with_host(|page| {
        page.options(element)
            .iter()
            .map(|o| o.value.clone())
            .collect()
    })
}

// ── Initialization ───────────────────────────────────────────────────

#[tokio::test]
async fn initialize_lists_years_newest_first_after_blank() {
    let controller = controller_with(ScriptedLookup::catalog(), DrivetrainFallback::Fwd);
    let outcome = controller.initialize().await.expect("initialize");

    assert_eq!(
        outcome,
        StepOutcome::Populated {
            field: CascadeField::Year,
            count: 3
        }
    );
    assert_eq!(page_values(&controller, "year-select"), vec!["", "2020", "2019", "2018"]);
    assert!(page_values(&controller, "make-select").is_empty());
}

// ── Cascade steps ────────────────────────────────────────────────────

#[tokio::test]
async fn year_change_populates_makes_common_first() {
    let controller = ready_controller().await;
    let outcome = controller.select_year(Some("2020")).await.expect("year");

    assert_eq!(
        outcome,
        StepOutcome::Populated {
            field: CascadeField::Make,
            count: 4
        }
    );
    assert_eq!(
        page_values(&controller, "make-select"),
        vec!["", "acura", "honda", "ac", "alpina"]
    );
    assert_eq!(controller.selection().year.as_deref(), Some("2020"));
}

#[tokio::test]
async fn full_cascade_resolves_trim_into_form() {
    let controller = ready_controller().await;
    select_civic(&controller).await;

    assert_eq!(page_values(&controller, "trim-select"), vec!["", "1001", "1002"]);
    let labels: Vec<String> = controller.with_host(|page| {
        page.options("trim-select").iter().map(|o| o.label.clone()).collect()
    });
    assert_eq!(labels, vec!["", "Si", "Default"]);

    let outcome = controller.select_trim(Some("1001")).await.expect("trim");
    let StepOutcome::Resolved(spec) = outcome else {
        panic!("expected a resolved trim");
    };
    assert_eq!(spec.horsepower, 197);
    assert_eq!(spec.drivetrain, Some(Drivetrain::Fwd));

    controller.with_host(|page| {
        assert_eq!(page.value("year"), Some("2020"));
        assert_eq!(page.value("make"), Some("Honda"));
        assert_eq!(page.value("model"), Some("Civic"));
        assert_eq!(page.value("model_id"), Some("1001"));
        assert_eq!(page.value("horsepower"), Some("197"));
        assert_eq!(page.value("torque"), Some("221"));
        assert_eq!(page.value("weight"), Some("1500"));
        assert_eq!(page.value("engine_size"), Some("2.0"));
        assert_eq!(page.value("drivetrain"), Some("FWD"));
    });
    assert_eq!(controller.selection().trim.as_deref(), Some("1001"));
    assert_eq!(controller.resolved().map(|s| s.torque), Some(221));
}

#[tokio::test]
async fn trim_without_power_writes_zero() {
    let controller = ready_controller().await;
    select_civic(&controller).await;

    let _ = controller.select_trim(Some("1002")).await.expect("trim");
    controller.with_host(|page| {
        assert_eq!(page.value("horsepower"), Some("0"));
        assert_eq!(page.value("engine_size"), Some("0.0"));
        assert_eq!(page.value("drivetrain"), Some("FWD"));
    });
}

#[tokio::test]
async fn keep_previous_fallback_leaves_drivetrain_untouched() {
    let controller = controller_with(ScriptedLookup::catalog(), DrivetrainFallback::KeepPrevious);
    let _ = controller.initialize().await.expect("initialize");
    select_civic(&controller).await;

    let _ = controller.select_trim(Some("1001")).await.expect("si");
    let _ = controller.select_trim(Some("1002")).await.expect("base");

    controller.with_host(|page| {
        assert_eq!(page.value("model_id"), Some("1002"));
        assert_eq!(page.value("drivetrain"), Some("FWD"));
    });
    assert_eq!(controller.resolved().and_then(|s| s.drivetrain), None);
}

// ── Invalidation ─────────────────────────────────────────────────────

#[tokio::test]
async fn changing_year_clears_every_downstream_field() {
    let controller = ready_controller().await;
    select_civic(&controller).await;
    assert_eq!(controller.cached_trims(), 2);

    let _ = controller.select_year(Some("2019")).await.expect("year");

    assert!(controller.options(CascadeField::Model).is_empty());
    assert!(controller.options(CascadeField::Trim).is_empty());
    assert_eq!(controller.cached_trims(), 0);
    assert!(page_values(&controller, "model-select").is_empty());
    assert!(page_values(&controller, "trim-select").is_empty());
    assert_eq!(page_values(&controller, "make-select"), vec!["", "volvo", "saab"]);

    let selection = controller.selection();
    assert_eq!(selection.make, None);
    assert_eq!(selection.model, None);
    assert_eq!(selection.trim, None);
}

#[tokio::test]
async fn clearing_make_clears_downstream_without_a_query() {
    let controller = ready_controller().await;
    select_civic(&controller).await;
    let calls_before = controller.lookup().calls();

    let outcome = controller.select_make(None).await.expect("clear");
    assert_eq!(
        outcome,
        StepOutcome::Cleared {
            field: CascadeField::Make
        }
    );
    assert!(controller.options(CascadeField::Model).is_empty());
    assert!(controller.options(CascadeField::Trim).is_empty());
    assert_eq!(controller.cached_trims(), 0);
    // make options remain selectable
    assert_eq!(controller.options(CascadeField::Make).len(), 4);
    assert_eq!(controller.lookup().calls(), calls_before);
}

#[tokio::test]
async fn blank_value_counts_as_clear() {
    let controller = ready_controller().await;
    let _ = controller.select_year(Some("2020")).await.expect("year");
    let outcome = controller.select_year(Some("")).await.expect("clear");

    assert_eq!(
        outcome,
        StepOutcome::Cleared {
            field: CascadeField::Year
        }
    );
    assert!(controller.options(CascadeField::Make).is_empty());
    assert_eq!(controller.selection().year, None);
}

// ── Invariant violations ─────────────────────────────────────────────

#[tokio::test]
async fn value_outside_current_options_is_rejected() {
    let controller = ready_controller().await;
    let err = controller.select_year(Some("1901")).await.unwrap_err();

    assert_eq!(
        err,
        CascadeError::NotOffered {
            field: CascadeField::Year,
            value: "1901".into()
        }
    );
    assert_eq!(controller.selection().year, None);
}

#[tokio::test]
async fn unknown_trim_reports_fault_and_writes_nothing() {
    let controller = ready_controller().await;
    select_civic(&controller).await;

    let err = controller.select_trim(Some("9999")).await.unwrap_err();
    assert_eq!(
        err,
        CascadeError::NoMatchFound {
            value: "9999".into()
        }
    );
    controller.with_host(|page| {
        assert_eq!(page.value("model_id"), None);
        assert_eq!(page.value("horsepower"), None);
    });
    assert!(controller.resolved().is_none());
}

#[tokio::test]
async fn trim_before_any_trim_list_is_no_match() {
    let controller = ready_controller().await;
    let err = controller.select_trim(Some("1001")).await.unwrap_err();
    assert!(matches!(err, CascadeError::NoMatchFound { .. }));
}

// ── Lookup failures ──────────────────────────────────────────────────

#[tokio::test]
async fn lookup_failure_is_shown_and_controller_recovers() {
    let mut lookup = ScriptedLookup::catalog();
    lookup
        .makes
        .get_mut("2020")
        .expect("2020 makes")
        .push(make("broken", false));
    let controller = controller_with(lookup, DrivetrainFallback::Fwd);
    let _ = controller.initialize().await.expect("initialize");
    let _ = controller.select_year(Some("2020")).await.expect("year");

    let err = controller.select_make(Some("broken")).await.unwrap_err();
    assert!(matches!(
        err,
        CascadeError::Lookup(LookupFailure::Network { .. })
    ));
    controller.with_host(|page| {
        let failure = page.failure("model-select").expect("failure shown");
        assert_eq!(failure.kind(), "network");
    });

    let outcome = controller.select_make(Some("honda")).await.expect("retry");
    assert_eq!(
        outcome,
        StepOutcome::Populated {
            field: CascadeField::Model,
            count: 2
        }
    );
    controller.with_host(|page| assert!(page.failure("model-select").is_none()));
}

#[tokio::test]
async fn empty_result_is_a_lookup_failure() {
    let controller = ready_controller().await;
    let _ = controller.select_year(Some("2020")).await.expect("year");

    let err = controller.select_make(Some("ac")).await.unwrap_err();
    assert_eq!(
        err,
        CascadeError::Lookup(LookupFailure::Empty {
            command: LookupCommand::GetModels
        })
    );
    assert!(controller.options(CascadeField::Model).is_empty());
}

// ── Out-of-order responses ───────────────────────────────────────────

#[tokio::test]
async fn stale_make_response_is_discarded() {
    let gate = Arc::new(Semaphore::new(0));
    let lookup = ScriptedLookup::catalog().gate_makes("2019", Arc::clone(&gate));
    let controller = controller_with(lookup, DrivetrainFallback::Fwd);
    let _ = controller.initialize().await.expect("initialize");

    let older = controller.select_year(Some("2019"));
    let newer = async {
        let outcome = controller.select_year(Some("2020")).await;
        gate.add_permits(1);
        outcome
    };
    let (older, newer) = tokio::join!(older, newer);

    assert_eq!(
        older.expect("older"),
        StepOutcome::Superseded {
            field: CascadeField::Make
        }
    );
    assert_eq!(
        newer.expect("newer"),
        StepOutcome::Populated {
            field: CascadeField::Make,
            count: 4
        }
    );
    assert_eq!(
        page_values(&controller, "make-select"),
        vec!["", "acura", "honda", "ac", "alpina"]
    );
    assert_eq!(controller.selection().year.as_deref(), Some("2020"));
}

#[tokio::test]
async fn response_after_upstream_clear_is_discarded() {
    let gate = Arc::new(Semaphore::new(0));
    let lookup = ScriptedLookup::catalog().gate_makes("2019", Arc::clone(&gate));
    let controller = controller_with(lookup, DrivetrainFallback::Fwd);
    let _ = controller.initialize().await.expect("initialize");

    let pending = controller.select_year(Some("2019"));
    let clear = async {
        let outcome = controller.select_year(None).await;
        gate.add_permits(1);
        outcome
    };
    let (pending, clear) = tokio::join!(pending, clear);

    assert_eq!(
        pending.expect("pending"),
        StepOutcome::Superseded {
            field: CascadeField::Make
        }
    );
    assert!(clear.is_ok());
    assert!(controller.options(CascadeField::Make).is_empty());
    assert!(page_values(&controller, "make-select").is_empty());
}

#[tokio::test]
async fn service_is_not_queried_for_cleared_fields() {
    let controller = ready_controller().await;
    let _ = controller.select_year(Some("2020")).await.expect("year");
    let _ = controller.select_year(None).await.expect("clear");
    let _ = controller.select_make(None).await.expect("clear make");

    // getYears + one getMakes
    assert_eq!(controller.lookup().calls(), 2);
}
