//! Catalog selection
//!
//! Selecting an offering opens a wizard scoped to it. At most one wizard is
//! open at a time; closing discards it so the next selection starts fresh.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::models::ContactField;
use crate::services::order_wizard::OrderWizard;

#[derive(Debug, Default)]
pub struct CatalogSession {
    wizard: Option<OrderWizard>,
}

impl CatalogSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(
        &mut self,
        catalog: &Catalog,
        offering_id: u32,
        required: &[ContactField],
    ) -> Result<&mut OrderWizard, CatalogError> {
        if self.wizard.is_some() {
            return Err(CatalogError::WizardAlreadyOpen);
        }
        let offering = catalog
            .get(offering_id)
            .ok_or(CatalogError::UnknownOffering(offering_id))?;

        tracing::info!(offering = offering.id, name = offering.name, "order wizard opened");
        Ok(self
            .wizard
            .insert(OrderWizard::new(offering.clone(), required.to_vec())))
    }

    pub fn current(&self) -> Option<&OrderWizard> {
        self.wizard.as_ref()
    }

    pub fn current_mut(&mut self) -> Result<&mut OrderWizard, CatalogError> {
        self.wizard.as_mut().ok_or(CatalogError::NoWizardOpen)
    }

    /// Close the open wizard. A wizard with a submission in flight stays open.
    pub fn close(&mut self) -> Result<(), CatalogError> {
        let wizard = self.wizard.as_mut().ok_or(CatalogError::NoWizardOpen)?;
        if wizard.is_submitting() {
            return Err(CatalogError::SubmissionInFlight);
        }
        wizard.close();
        tracing::info!(offering = wizard.offering().id, "order wizard closed");
        self.wizard = None;
        Ok(())
    }

    /// Drop a wizard that already closed itself from the `complete` step
    pub(crate) fn discard(&mut self) {
        self.wizard = None;
    }
}
