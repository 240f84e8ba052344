//! Company endpoints.

use super::collect_pages;
use crate::client::IntercomClient;
use crate::error::IntercomError;
use crate::models::{Company, CompanyLookup, CompanyQuery, Page, Resource};

const COMPANIES_PATH: &str = "companies";

impl IntercomClient {
    /// Fetches one page of companies matching `query`.
    pub async fn list_companies(
        &self,
        query: &CompanyQuery,
    ) -> Result<Page<Company>, IntercomError> {
        let response = self.get(COMPANIES_PATH, query.to_params()).await?;
        Ok(Page::from_response(response, "companies"))
    }

    /// Fetches every company matching `query`, walking all pages.
    pub async fn all_companies(&self, query: &CompanyQuery) -> Result<Vec<Company>, IntercomError> {
        collect_pages(|page| {
            let query = query.clone().page(page);
            async move { self.list_companies(&query).await }
        })
        .await
    }

    /// Finds a single company by company id or name.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::ResourceNotFound` if no such company exists.
    pub async fn find_company(&self, lookup: &CompanyLookup) -> Result<Company, IntercomError> {
        let response = self.get(COMPANIES_PATH, lookup.to_params()?).await?;
        Ok(Company::from_value(response))
    }

    /// Creates a company (or updates the company with the same company id).
    pub async fn create_company(&self, company: &Company) -> Result<Company, IntercomError> {
        require_key(company)?;
        let response = self.post(COMPANIES_PATH, company.save_attributes()).await?;
        Ok(Company::from_value(response))
    }

    /// Sends the company's writable attributes and merges the response back in.
    pub async fn save_company(&self, company: &mut Company) -> Result<(), IntercomError> {
        require_key(company)?;
        let response = self.post(COMPANIES_PATH, company.save_attributes()).await?;
        company.merge(response);
        Ok(())
    }
}

fn require_key(company: &Company) -> Result<(), IntercomError> {
    if company.company_id().is_none() && company.name().is_none() {
        return Err(IntercomError::validation(
            "a company_id or name is required to save a company",
        ));
    }
    Ok(())
}
