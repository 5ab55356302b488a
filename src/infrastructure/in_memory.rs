use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::customer::{Customer, CustomerCollection, NewCustomer};
use crate::domain::errors::DirectoryError;
use crate::domain::ports::DirectoryApi;
use crate::errors::EndpointError;

/// Insertion-ordered customer directory held in memory.
///
/// Backs the reference endpoint and enforces the checks the real service
/// performs: required names, a plausible email, and email uniqueness.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    customers: Mutex<Vec<Customer>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: Mutex::new(customers),
        }
    }

    pub fn list(&self) -> Result<CustomerCollection, EndpointError> {
        Ok(self.lock()?.clone())
    }

    pub fn insert(&self, new: NewCustomer) -> Result<Customer, EndpointError> {
        let customer = validate(new)?;
        let mut customers = self.lock()?;
        if customers
            .iter()
            .any(|c| c.email.eq_ignore_ascii_case(&customer.email))
        {
            return Err(EndpointError::Conflict {
                code: "duplicate_email".to_string(),
                message: format!("A customer with email {} already exists", customer.email),
            });
        }
        customers.push(customer.clone());
        Ok(customer)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Customer>>, EndpointError> {
        self.customers
            .lock()
            .map_err(|e| EndpointError::Internal(e.to_string()))
    }
}

fn validate(new: NewCustomer) -> Result<Customer, EndpointError> {
    let first_name = required("firstName", new.first_name)?;
    let last_name = required("lastName", new.last_name)?;
    let email = required("email", new.email)?;

    let valid_email = email
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'))
        .unwrap_or(false);
    if !valid_email {
        return Err(EndpointError::invalid(
            "invalid_email",
            format!("{} is not a valid email address", email),
        ));
    }

    let business_name = Some(new.business_name.trim().to_string()).filter(|b| !b.is_empty());

    Ok(Customer {
        first_name,
        last_name,
        email,
        business_name,
    })
}

fn required(field: &str, value: String) -> Result<String, EndpointError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EndpointError::invalid(
            "missing_field",
            format!("{} is required", field),
        ));
    }
    Ok(value.to_string())
}

#[async_trait]
impl DirectoryApi for InMemoryDirectory {
    async fn list_customers(&self) -> Result<CustomerCollection, DirectoryError> {
        Ok(self.list()?)
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<(), DirectoryError> {
        self.insert(customer.clone())?;
        Ok(())
    }
}
