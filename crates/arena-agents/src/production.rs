//! Resource-gated production scheduler.
//!
//! The facility can start one unit per tick, so the scheduler issues at most
//! one production command per tick, chosen in two stages:
//!
//! 1. **Economy** -- while gatherers are below quota and the cheapest
//!    gatherer template is affordable, produce a gatherer.
//! 2. **Combat** -- only when stage 1 issued nothing and at least one
//!    gatherer exists. Walk melee, ranged, support in priority order, and
//!    for the first role below quota that has an affordable template,
//!    produce the most expensive such template.
//!
//! Stage 2 also waits for `combat_min_resource` in the facility. A refused
//! command reserves nothing; the role stays below quota and the scheduler
//! tries again next tick.
//!
//! Planning is pure ([`ProductionScheduler::plan`]) so the selection rules
//! can be tested without a host.

use arena_types::{BodyCatalog, BodyTemplate, EntityId, Facility, Role};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ProductionConfig, RoleConfig};
use crate::error::ProductionError;
use crate::host::Host;
use crate::roles::{RolePopulation, RoleTable};

/// Which stage chose a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStage {
    /// Gatherer production.
    Economy,
    /// Combat production.
    Combat,
}

/// A template chosen for production this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionPlan {
    /// Stage that made the choice.
    pub stage: ProductionStage,
    /// The chosen template.
    pub template: &'static BodyTemplate,
}

/// A production command the host accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionOrder {
    /// Stage that made the choice.
    pub stage: ProductionStage,
    /// Role the unit was built for.
    pub role: Role,
    /// Resource spent.
    pub cost: u32,
    /// The new unit, when the host reported its id.
    pub unit_id: Option<EntityId>,
}

/// What the scheduler did this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductionReport {
    /// No own facility is visible.
    NoFacility,
    /// Nothing needed or nothing affordable.
    Idle {
        /// Resource available in the facility.
        available: u32,
    },
    /// A production command was accepted.
    Produced(ProductionOrder),
    /// A production command was refused.
    Failed(ProductionError),
}

/// Chooses and issues at most one production command per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionScheduler {
    catalog: BodyCatalog,
    roles: RoleConfig,
    config: ProductionConfig,
}

impl ProductionScheduler {
    /// Create a scheduler over a template catalog.
    pub const fn new(catalog: BodyCatalog, roles: RoleConfig, config: ProductionConfig) -> Self {
        Self {
            catalog,
            roles,
            config,
        }
    }

    /// Choose what to produce given post-eviction populations and the
    /// resource available this tick.
    ///
    /// The returned template never costs more than `available`.
    pub fn plan(&self, population: &RolePopulation, available: u32) -> Option<ProductionPlan> {
        let quotas = &self.roles.quotas;
        let gatherers = population.get(Role::Gatherer);

        if gatherers < quotas.quota(Role::Gatherer)
            && let Some(template) = self.catalog.cheapest(Role::Gatherer)
            && template.cost <= available
        {
            return Some(ProductionPlan {
                stage: ProductionStage::Economy,
                template,
            });
        }

        if gatherers == 0 || available < self.config.combat_min_resource {
            return None;
        }

        Role::COMBAT_PRIORITY
            .into_iter()
            .filter(|&role| population.get(role) < quotas.quota(role))
            .find_map(|role| self.catalog.most_expensive_affordable(role, available))
            .map(|template| ProductionPlan {
                stage: ProductionStage::Combat,
                template,
            })
    }

    /// Issue a planned production at the facility.
    ///
    /// On success the produced role is reserved for the new unit's id. On
    /// failure nothing is recorded.
    pub fn execute<H: Host + ?Sized>(
        host: &mut H,
        facility: &Facility,
        plan: ProductionPlan,
        roles: &mut RoleTable,
    ) -> Result<ProductionOrder, ProductionError> {
        let template = plan.template;
        let result = host.produce(&facility.id, template);

        if !result.outcome.is_success() {
            return Err(ProductionError::Rejected {
                facility: facility.id.clone(),
                role: template.role,
                cost: template.cost,
                outcome: result.outcome,
            });
        }

        if let Some(id) = &result.unit_id {
            roles.reserve(id.clone(), template.role);
        }

        Ok(ProductionOrder {
            stage: plan.stage,
            role: template.role,
            cost: template.cost,
            unit_id: result.unit_id,
        })
    }

    /// Plan and issue this tick's production.
    ///
    /// Populations are read from `roles`, which must already reflect this
    /// tick's eviction pass.
    pub fn run<H: Host + ?Sized>(
        &self,
        host: &mut H,
        facility: Option<&Facility>,
        roles: &mut RoleTable,
    ) -> ProductionReport {
        let Some(facility) = facility else {
            debug!("no facility visible, skipping production");
            return ProductionReport::NoFacility;
        };

        let available = facility.stored_resource();
        let population = roles.population();
        let Some(plan) = self.plan(&population, available) else {
            debug!(available, "nothing to produce");
            return ProductionReport::Idle { available };
        };

        match Self::execute(host, facility, plan, roles) {
            Ok(order) => {
                let quota = self.roles.quotas.quota(order.role);
                let count = population.get(order.role).saturating_add(1);
                info!(
                    role = %order.role,
                    cost = order.cost,
                    stage = ?order.stage,
                    count,
                    quota,
                    "unit produced"
                );
                ProductionReport::Produced(order)
            }
            Err(err) => {
                warn!(error = %err, "production refused");
                ProductionReport::Failed(err)
            }
        }
    }
}

impl Default for ProductionScheduler {
    fn default() -> Self {
        Self::new(
            BodyCatalog::standard(),
            RoleConfig::default(),
            ProductionConfig::default(),
        )
    }
}
