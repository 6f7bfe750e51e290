use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::schedule::{summarize, AmortizationSchedule, LoanSummary};
use crate::types::{LoanId, LoanTerms, PaymentFrequency, UserId};

/// registered user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
}

/// loan record as persisted, rate held as a percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub amount: Money,
    pub annual_interest_rate: Decimal,
    pub loan_term_months: u32,
    pub frequency: PaymentFrequency,
    pub user_id: UserId,
}

impl Loan {
    /// engine terms for this record, normalizing the percentage rate to a fraction
    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.amount,
            Rate::from_percentage(self.annual_interest_rate),
            self.loan_term_months,
            self.frequency,
        )
    }
}

/// payload for registering a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

/// payload for originating a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoan {
    pub amount: Money,
    pub annual_interest_rate: Decimal,
    pub loan_term_months: u32,
    pub frequency: PaymentFrequency,
}

/// in-memory store of users and their loans, listed in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanRegistry {
    users: Vec<User>,
    loans: Vec<Loan>,
}

impl LoanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// register a user, rejecting duplicate emails
    pub fn create_user(&mut self, new_user: NewUser) -> Result<User> {
        if self.user_by_email(&new_user.email).is_some() {
            return Err(LoanError::EmailAlreadyRegistered {
                email: new_user.email,
            });
        }

        // placeholder transformation, not real password hashing
        let hashed_password = format!("{}notreallyhashed", new_user.password);
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            hashed_password,
            is_active: true,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// look up a user by id
    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(LoanError::UserNotFound { id })
    }

    /// look up a user by email
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// list users in registration order
    pub fn users(&self, skip: usize, limit: usize) -> Vec<&User> {
        self.users.iter().skip(skip).take(limit).collect()
    }

    /// originate a loan for an existing user
    pub fn create_loan_for_user(&mut self, user_id: UserId, new_loan: NewLoan) -> Result<Loan> {
        self.user(user_id)?;

        let loan = Loan {
            id: Uuid::new_v4(),
            amount: new_loan.amount,
            annual_interest_rate: new_loan.annual_interest_rate,
            loan_term_months: new_loan.loan_term_months,
            frequency: new_loan.frequency,
            user_id,
        };
        self.loans.push(loan);
        Ok(loan)
    }

    /// look up a loan by id
    pub fn loan(&self, id: LoanId) -> Result<&Loan> {
        self.loans
            .iter()
            .find(|l| l.id == id)
            .ok_or(LoanError::LoanNotFound { id })
    }

    /// list a user's loans in origination order
    pub fn user_loans(&self, user_id: UserId, skip: usize, limit: usize) -> Result<Vec<&Loan>> {
        self.user(user_id)?;
        Ok(self
            .loans
            .iter()
            .filter(|l| l.user_id == user_id)
            .skip(skip)
            .take(limit)
            .collect())
    }

    /// reassign a loan to another user
    pub fn share_loan(&mut self, loan_id: LoanId, user_id: UserId) -> Result<()> {
        let position = self
            .loans
            .iter()
            .position(|l| l.id == loan_id)
            .ok_or(LoanError::LoanNotFound { id: loan_id })?;
        self.user(user_id)?;

        self.loans[position].user_id = user_id;
        Ok(())
    }

    /// full repayment schedule for a persisted loan
    pub fn loan_schedule(&self, loan_id: LoanId) -> Result<AmortizationSchedule> {
        let loan = self.loan(loan_id)?;
        AmortizationSchedule::generate(loan.terms())
    }

    /// summary of a persisted loan through the given period
    pub fn loan_summary(&self, loan_id: LoanId, through_period: u32) -> Result<LoanSummary> {
        let loan = self.loan(loan_id)?;
        summarize(&loan.terms(), through_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    fn reference_loan() -> NewLoan {
        NewLoan {
            amount: Money::from_major(1000),
            annual_interest_rate: dec!(5.0),
            loan_term_months: 36,
            frequency: PaymentFrequency::Monthly,
        }
    }

    #[test]
    fn test_create_and_look_up_user() {
        let mut registry = LoanRegistry::new();
        let user = registry.create_user(new_user("alice@example.com")).unwrap();

        assert!(user.is_active);
        assert_eq!(user.hashed_password, "hunter2notreallyhashed");
        assert_eq!(registry.user(user.id).unwrap(), &user);
        assert_eq!(
            registry.user_by_email("alice@example.com").unwrap().id,
            user.id
        );
        assert!(registry.user_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut registry = LoanRegistry::new();
        registry.create_user(new_user("alice@example.com")).unwrap();

        let result = registry.create_user(new_user("alice@example.com"));
        assert!(matches!(
            result,
            Err(LoanError::EmailAlreadyRegistered { email }) if email == "alice@example.com"
        ));
    }

    #[test]
    fn test_unknown_user_lookup_fails() {
        let registry = LoanRegistry::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            registry.user(id),
            Err(LoanError::UserNotFound { id: missing }) if missing == id
        ));
    }

    #[test]
    fn test_users_pagination() {
        let mut registry = LoanRegistry::new();
        for i in 0..5 {
            registry
                .create_user(new_user(&format!("user{i}@example.com")))
                .unwrap();
        }

        let page = registry.users(1, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "user1@example.com");
        assert_eq!(page[1].email, "user2@example.com");

        assert!(registry.users(5, 100).is_empty());
    }

    #[test]
    fn test_create_loan_requires_user() {
        let mut registry = LoanRegistry::new();
        let result = registry.create_loan_for_user(Uuid::new_v4(), reference_loan());
        assert!(matches!(result, Err(LoanError::UserNotFound { .. })));
    }

    #[test]
    fn test_user_loans_listing() {
        let mut registry = LoanRegistry::new();
        let alice = registry.create_user(new_user("alice@example.com")).unwrap();
        let bob = registry.create_user(new_user("bob@example.com")).unwrap();

        let first = registry
            .create_loan_for_user(alice.id, reference_loan())
            .unwrap();
        let second = registry
            .create_loan_for_user(alice.id, reference_loan())
            .unwrap();
        registry
            .create_loan_for_user(bob.id, reference_loan())
            .unwrap();

        let loans = registry.user_loans(alice.id, 0, 100).unwrap();
        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].id, first.id);
        assert_eq!(loans[1].id, second.id);

        assert_eq!(registry.user_loans(alice.id, 1, 100).unwrap().len(), 1);
        assert!(matches!(
            registry.user_loans(Uuid::new_v4(), 0, 100),
            Err(LoanError::UserNotFound { .. })
        ));
    }

    #[test]
    fn test_share_loan_reassigns_owner() {
        let mut registry = LoanRegistry::new();
        let alice = registry.create_user(new_user("alice@example.com")).unwrap();
        let bob = registry.create_user(new_user("bob@example.com")).unwrap();
        let loan = registry
            .create_loan_for_user(alice.id, reference_loan())
            .unwrap();

        registry.share_loan(loan.id, bob.id).unwrap();

        assert_eq!(registry.loan(loan.id).unwrap().user_id, bob.id);
        assert!(registry.user_loans(alice.id, 0, 100).unwrap().is_empty());
        assert_eq!(registry.user_loans(bob.id, 0, 100).unwrap().len(), 1);
    }

    #[test]
    fn test_share_loan_unknown_targets() {
        let mut registry = LoanRegistry::new();
        let alice = registry.create_user(new_user("alice@example.com")).unwrap();
        let loan = registry
            .create_loan_for_user(alice.id, reference_loan())
            .unwrap();

        assert!(matches!(
            registry.share_loan(Uuid::new_v4(), alice.id),
            Err(LoanError::LoanNotFound { .. })
        ));
        assert!(matches!(
            registry.share_loan(loan.id, Uuid::new_v4()),
            Err(LoanError::UserNotFound { .. })
        ));
        // failed share leaves ownership untouched
        assert_eq!(registry.loan(loan.id).unwrap().user_id, alice.id);
    }

    #[test]
    fn test_loan_schedule_normalizes_percentage_rate() {
        let mut registry = LoanRegistry::new();
        let alice = registry.create_user(new_user("alice@example.com")).unwrap();
        let loan = registry
            .create_loan_for_user(alice.id, reference_loan())
            .unwrap();

        let schedule = registry.loan_schedule(loan.id).unwrap();

        assert_eq!(schedule.rows.len(), 36);
        assert_eq!(
            schedule.periodic_payment,
            Money::from_str_exact("29.97").unwrap()
        );
        let first = &schedule.rows[0];
        assert_eq!(
            first.remaining_balance,
            Money::from_str_exact("974.20").unwrap()
        );
        let last = schedule.rows.last().unwrap();
        assert_eq!(last.payment_amount, Money::from_str_exact("29.98").unwrap());
        assert_eq!(last.remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_loan_summary_through_period() {
        let mut registry = LoanRegistry::new();
        let alice = registry.create_user(new_user("alice@example.com")).unwrap();
        let loan = registry
            .create_loan_for_user(alice.id, reference_loan())
            .unwrap();

        let summary = registry.loan_summary(loan.id, 14).unwrap();

        assert_eq!(
            summary.current_principal_balance,
            Money::from_str_exact("628.78").unwrap()
        );
        assert_eq!(
            summary.aggregate_principal_paid,
            Money::from_str_exact("371.22").unwrap()
        );
        assert_eq!(
            summary.aggregate_interest_paid,
            Money::from_str_exact("48.36").unwrap()
        );

        assert!(matches!(
            registry.loan_summary(Uuid::new_v4(), 14),
            Err(LoanError::LoanNotFound { .. })
        ));
    }
}
