use crate::auth::{AuthPools, AuthQueues};
use crate::disputes::DisputesState;
use crate::entropy::Entropy;
use crate::history::RecentHistory;
use crate::safrole::SafroleState;
use crate::service::Services;
use crate::stats::Statistics;
use crate::validators::ValidatorKeyState;
use crate::work_report::PendingReports;
use crate::State;
use jam_types::TimeSlot;

/// A struct of `Option<T>` "prime" fields, one per top-level state entity
/// — the idiomatic rendering of spec.md §4.10's "ensure(field) / get(field)"
/// staging mechanism (a dense struct, per §9's REDESIGN FLAGS, never a
/// dynamic field-name map). `ensure_*` lazily clones the base field into
/// the prime on first access and returns a mutable borrow of it; `get_*`
/// prefers the prime if present, falling back to the base otherwise.
/// [`StateDelta::merge`] atomically moves every present prime over its
/// base field; the base itself is never mutated directly.
pub struct StateDelta<'a> {
    base: &'a State,
    tau: Option<TimeSlot>,
    beta: Option<RecentHistory>,
    eta: Option<Entropy>,
    validator_keys: Option<ValidatorKeyState>,
    safrole: Option<SafroleState>,
    psi: Option<DisputesState>,
    rho: Option<PendingReports>,
    services: Option<Services>,
    stats: Option<Statistics>,
    auth_pools: Option<AuthPools>,
    auth_queues: Option<AuthQueues>,
}

macro_rules! delta_field {
    ($ensure:ident, $get:ident, $field:ident, $ty:ty) => {
        pub fn $ensure(&mut self) -> &mut $ty {
            self.$field.get_or_insert_with(|| self.base.$field.clone())
        }

        pub fn $get(&self) -> &$ty {
            self.$field.as_ref().unwrap_or(&self.base.$field)
        }
    };
}

impl<'a> StateDelta<'a> {
    pub fn new(base: &'a State) -> Self {
        Self {
            base,
            tau: None,
            beta: None,
            eta: None,
            validator_keys: None,
            safrole: None,
            psi: None,
            rho: None,
            services: None,
            stats: None,
            auth_pools: None,
            auth_queues: None,
        }
    }

    pub fn base(&self) -> &'a State {
        self.base
    }

    delta_field!(ensure_tau, get_tau, tau, TimeSlot);
    delta_field!(ensure_beta, get_beta, beta, RecentHistory);
    delta_field!(ensure_eta, get_eta, eta, Entropy);
    delta_field!(
        ensure_validator_keys,
        get_validator_keys,
        validator_keys,
        ValidatorKeyState
    );
    delta_field!(ensure_safrole, get_safrole, safrole, SafroleState);
    delta_field!(ensure_psi, get_psi, psi, DisputesState);
    delta_field!(ensure_rho, get_rho, rho, PendingReports);
    delta_field!(ensure_services, get_services, services, Services);
    delta_field!(ensure_stats, get_stats, stats, Statistics);
    delta_field!(ensure_auth_pools, get_auth_pools, auth_pools, AuthPools);
    delta_field!(ensure_auth_queues, get_auth_queues, auth_queues, AuthQueues);

    /// Moves every present prime over its base field, producing the
    /// post-state. Consumes `self`: a delta is merged at most once.
    pub fn merge(self) -> State {
        State {
            tau: self.tau.unwrap_or(self.base.tau),
            beta: self.beta.unwrap_or_else(|| self.base.beta.clone()),
            eta: self.eta.unwrap_or(self.base.eta),
            validator_keys: self
                .validator_keys
                .unwrap_or_else(|| self.base.validator_keys.clone()),
            safrole: self.safrole.unwrap_or_else(|| self.base.safrole.clone()),
            psi: self.psi.unwrap_or_else(|| self.base.psi.clone()),
            rho: self.rho.unwrap_or_else(|| self.base.rho.clone()),
            services: self.services.unwrap_or_else(|| self.base.services.clone()),
            stats: self.stats.unwrap_or_else(|| self.base.stats.clone()),
            auth_pools: self
                .auth_pools
                .unwrap_or_else(|| self.base.auth_pools.clone()),
            auth_queues: self
                .auth_queues
                .unwrap_or_else(|| self.base.auth_queues.clone()),
        }
    }
}
