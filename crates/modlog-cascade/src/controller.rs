//! The cascade controller.
//!
//! Each change to a field synchronously clears everything downstream and
//! then asynchronously fetches the next field's options. Requests may
//! overlap: every field carries an epoch that is bumped when the field is
//! cleared or re-requested, and a response is applied only if the epoch it
//! was issued under is still current.

use std::sync::{Mutex, MutexGuard, PoisonError};

use modlog_common::config::{FieldBindings, ModlogConfig};
use modlog_common::types::{CascadeField, DrivetrainFallback, SelectOption};
use modlog_lookup::error::LookupFailure;
use modlog_lookup::models::SpecRecord;
use modlog_lookup::{LookupQuery, LookupService};

use crate::error::CascadeError;
use crate::host::FormHost;
use crate::options;
use crate::spec::DerivedSpec;

/// Result of a successful change.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// `field` was filled with `count` options (plus the leading blank).
    Populated {
        /// Field that was filled.
        field: CascadeField,
        /// Number of non-blank options.
        count: usize,
    },
    /// `field` was cleared; nothing downstream was requested.
    Cleared {
        /// Field that was cleared.
        field: CascadeField,
    },
    /// A newer change made this response obsolete; nothing was written.
    Superseded {
        /// Field the discarded response was for.
        field: CascadeField,
    },
    /// A trim resolved and every output field was written.
    Resolved(DerivedSpec),
}

/// Current value of each cascade field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Chosen year.
    pub year: Option<String>,
    /// Chosen make identifier.
    pub make: Option<String>,
    /// Chosen model name.
    pub model: Option<String>,
    /// Chosen trim (provider model id).
    pub trim: Option<String>,
}

#[derive(Debug, Default)]
struct CascadeState {
    selection: [Option<String>; 4],
    options: [Vec<SelectOption>; 4],
    trims: Vec<SpecRecord>,
    epochs: [u64; 4],
    resolved: Option<DerivedSpec>,
}

impl CascadeState {
    fn offers(&self, field: CascadeField, value: &str) -> bool {
        self.options[field.index()].iter().any(|o| o.value == value)
    }

    fn bump(&mut self, field: CascadeField) -> u64 {
        let epoch = &mut self.epochs[field.index()];
        *epoch = epoch.wrapping_add(1);
        *epoch
    }

    /// Starts a request for `field` under the current upstream selection.
    fn ticket(&mut self, field: CascadeField) -> Ticket {
        let [year, make, model, _] = &self.selection;
        let query = LookupQuery {
            year: year.clone(),
            make: make.clone(),
            model: model.clone(),
        };
        Ticket {
            field,
            epoch: self.bump(field),
            query,
        }
    }
}

/// A request in flight for one field.
#[derive(Debug)]
struct Ticket {
    field: CascadeField,
    epoch: u64,
    query: LookupQuery,
}

struct Fetched {
    options: Vec<SelectOption>,
    trims: Option<Vec<SpecRecord>>,
}

impl Fetched {
    const fn options(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            trims: None,
        }
    }
}

#[derive(Debug)]
struct Inner<H> {
    host: H,
    state: CascadeState,
}

impl<H: FormHost> Inner<H> {
    /// Drops a field's options, selection and cached records.
    fn clear(&mut self, field: CascadeField, bindings: &FieldBindings) {
        let idx = field.index();
        let _ = self.state.bump(field);
        self.state.options[idx].clear();
        self.state.selection[idx] = None;
        if field.is_terminal() {
            self.state.trims.clear();
            self.state.resolved = None;
        }
        self.host.clear_options(bindings.select(field));
    }
}

/// Drives the year → make → model → trim cascade for one page.
#[derive(Debug)]
pub struct CascadeController<L, H> {
    lookup: L,
    bindings: FieldBindings,
    fallback: DrivetrainFallback,
    inner: Mutex<Inner<H>>,
}

impl<L: LookupService, H: FormHost> CascadeController<L, H> {
    /// Creates a controller over `host`. Call [`initialize`](Self::initialize)
    /// to load the year list.
    pub fn new(lookup: L, host: H, bindings: FieldBindings, fallback: DrivetrainFallback) -> Self {
        Self {
            lookup,
            bindings,
            fallback,
            inner: Mutex::new(Inner {
                host,
                state: CascadeState::default(),
            }),
        }
    }

    /// Creates a controller using the bindings and fallback from `config`.
    pub fn from_config(lookup: L, host: H, config: &ModlogConfig) -> Self {
        Self::new(lookup, host, config.bindings.clone(), config.drivetrain_fallback)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<H>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resets every field and loads the year list.
    ///
    /// # Errors
    ///
    /// Returns `CascadeError::Lookup` if the years cannot be fetched.
    pub async fn initialize(&self) -> Result<StepOutcome, CascadeError> {
        let ticket = {
            let mut inner = self.lock();
            for field in CascadeField::ALL {
                inner.clear(field, &self.bindings);
            }
            inner.state.ticket(CascadeField::Year)
        };
        tracing::debug!("loading year list");
        self.complete(ticket).await
    }

    /// Applies a change of `field` to `value`; `None` or `""` clears it.
    ///
    /// # Errors
    ///
    /// - `NotOffered` if `value` is not among the field's current options.
    /// - `NoMatchFound` if a trim value does not resolve.
    /// - `Lookup` if the next field's options cannot be fetched.
    pub async fn select(
        &self,
        field: CascadeField,
        value: Option<&str>,
    ) -> Result<StepOutcome, CascadeError> {
        let value = value.filter(|v| !v.is_empty());
        if field.is_terminal() {
            return self.resolve_trim(value);
        }

        let ticket = {
            let mut inner = self.lock();
            if let Some(v) = value {
                if !inner.state.offers(field, v) {
                    return Err(CascadeError::NotOffered {
                        field,
                        value: v.to_string(),
                    });
                }
            }
            for &downstream in field.downstream() {
                inner.clear(downstream, &self.bindings);
            }
            inner.state.selection[field.index()] = value.map(str::to_owned);
            tracing::debug!(%field, value = ?value, "field changed");

            match (value, field.next()) {
                (Some(_), Some(next)) => inner.state.ticket(next),
                _ => return Ok(StepOutcome::Cleared { field }),
            }
        };
        self.complete(ticket).await
    }

    /// Changes the year.
    ///
    /// # Errors
    ///
    /// See [`select`](Self::select).
    pub async fn select_year(&self, year: Option<&str>) -> Result<StepOutcome, CascadeError> {
        self.select(CascadeField::Year, year).await
    }

    /// Changes the make.
    ///
    /// # Errors
    ///
    /// See [`select`](Self::select).
    pub async fn select_make(&self, make: Option<&str>) -> Result<StepOutcome, CascadeError> {
        self.select(CascadeField::Make, make).await
    }

    /// Changes the model.
    ///
    /// # Errors
    ///
    /// See [`select`](Self::select).
    pub async fn select_model(&self, model: Option<&str>) -> Result<StepOutcome, CascadeError> {
        self.select(CascadeField::Model, model).await
    }

    /// Changes the trim, writing the derived specification on a match.
    ///
    /// # Errors
    ///
    /// Returns `NoMatchFound` if `trim` is not in the current trim list.
    pub async fn select_trim(&self, trim: Option<&str>) -> Result<StepOutcome, CascadeError> {
        self.select(CascadeField::Trim, trim).await
    }

    fn resolve_trim(&self, value: Option<&str>) -> Result<StepOutcome, CascadeError> {
        let mut inner = self.lock();
        let Some(value) = value else {
            inner.state.selection[CascadeField::Trim.index()] = None;
            inner.state.resolved = None;
            return Ok(StepOutcome::Cleared {
                field: CascadeField::Trim,
            });
        };

        let Some(record) = inner.state.trims.iter().find(|t| t.model_id == value) else {
            tracing::warn!(trim = value, "trim value is not in the current trim list");
            return Err(CascadeError::NoMatchFound {
                value: value.to_string(),
            });
        };
        let spec = DerivedSpec::from_record(record, self.fallback);

        for (field, rendered) in spec.output_values() {
            inner.host.write_value(self.bindings.output(field), &rendered);
        }
        inner.state.selection[CascadeField::Trim.index()] = Some(value.to_string());
        inner.state.resolved = Some(spec.clone());
        tracing::info!(
            model_id = %spec.model_id,
            horsepower = spec.horsepower,
            torque = spec.torque,
            drivetrain = ?spec.drivetrain,
            "trim resolved"
        );
        Ok(StepOutcome::Resolved(spec))
    }

    async fn fetch(&self, ticket: &Ticket) -> Result<Fetched, LookupFailure> {
        let year = ticket.query.year.as_deref().unwrap_or_default();
        let make = ticket.query.make.as_deref().unwrap_or_default();
        let model = ticket.query.model.as_deref().unwrap_or_default();

        match ticket.field {
            CascadeField::Year => {
                let range = self.lookup.years().await?;
                Ok(Fetched::options(options::year_options(range)))
            }
            CascadeField::Make => {
                let makes = self.lookup.makes(year).await?;
                Ok(Fetched::options(options::make_options(makes)))
            }
            CascadeField::Model => {
                let models = self.lookup.models(year, make).await?;
                Ok(Fetched::options(options::model_options(&models)))
            }
            CascadeField::Trim => {
                let trims = self.lookup.trims(year, make, model).await?;
                Ok(Fetched {
                    options: options::trim_options(&trims),
                    trims: Some(trims),
                })
            }
        }
    }

    /// Runs `ticket`'s lookup and applies the result if still current.
    async fn complete(&self, ticket: Ticket) -> Result<StepOutcome, CascadeError> {
        let fetched = self.fetch(&ticket).await;

        let mut inner = self.lock();
        let field = ticket.field;
        if inner.state.epochs[field.index()] != ticket.epoch {
            tracing::debug!(%field, epoch = ticket.epoch, "discarding superseded lookup response");
            return Ok(StepOutcome::Superseded { field });
        }

        let element = self.bindings.select(field);
        match fetched {
            Ok(fetched) => {
                let count = fetched.options.len();
                let mut listed = Vec::with_capacity(count + 1);
                listed.push(SelectOption::blank());
                listed.extend(fetched.options.iter().cloned());
                inner.host.set_options(element, &listed);

                inner.state.options[field.index()] = fetched.options;
                if let Some(trims) = fetched.trims {
                    inner.state.trims = trims;
                }
                tracing::debug!(%field, count, "field populated");
                Ok(StepOutcome::Populated { field, count })
            }
            Err(failure) => {
                tracing::warn!(
                    %field,
                    command = %failure.command(),
                    kind = failure.kind(),
                    error = %failure,
                    "lookup failed"
                );
                inner.host.report_failure(element, &failure);
                Err(failure.into())
            }
        }
    }

    /// Current value of every field.
    pub fn selection(&self) -> Selection {
        let inner = self.lock();
        let [year, make, model, trim] = inner.state.selection.clone();
        Selection {
            year,
            make,
            model,
            trim,
        }
    }

    /// Options currently offered by `field`, without the leading blank.
    pub fn options(&self, field: CascadeField) -> Vec<SelectOption> {
        self.lock().state.options[field.index()].clone()
    }

    /// Specification of the currently resolved trim.
    pub fn resolved(&self) -> Option<DerivedSpec> {
        self.lock().state.resolved.clone()
    }

    /// Number of trim records cached for resolution.
    pub fn cached_trims(&self) -> usize {
        self.lock().state.trims.len()
    }

    /// Lookup service in use.
    pub const fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Element bindings in use.
    pub const fn bindings(&self) -> &FieldBindings {
        &self.bindings
    }

    /// Runs `f` against the host page.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.lock().host)
    }

    /// Consumes the controller, returning the host page.
    pub fn into_host(self) -> H {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .host
    }
}
