//! # Company Letterhead
//!
//! Static company details printed at the top and bottom of every document.
//! The defaults are the issuing company's; a `[company]` config section
//! can override any field.

use serde::{Deserialize, Serialize};

/// Issuing company details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub activity: String,
    pub address: String,
    pub phone_fax: String,
    pub bank: String,
    pub rib: String,
    pub email: String,
    pub website: String,
    /// Registre du commerce.
    pub rc: String,
    /// Article d'imposition.
    pub ai: String,
    pub fiscal_id: String,
    pub nis: String,
    /// Footer signature line.
    pub signature: String,
    /// Centered footer statement.
    pub warranty: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "SARL PROTRONIC INTERNATIONAL".to_string(),
            activity: "Distribution".to_string(),
            address: "03, Rue Louise de Betignie - Alger".to_string(),
            phone_fax: "Tél: 021.64.63.60 / 61  Fax: 021.64.66.65".to_string(),
            bank: "Société Générale Algérie".to_string(),
            rib: "0210002113000003042".to_string(),
            email: "direction@protronic-dz.com".to_string(),
            website: "www.protronic-dz.com".to_string(),
            rc: "998 0008022".to_string(),
            ai: "16017486401".to_string(),
            fiscal_id: "09991600803277".to_string(),
            nis: "099616010516338".to_string(),
            signature: "SARL PROTRONIC Commercial".to_string(),
            warranty: "Notre matériel est garanti une année contre tout vice de fabrication \
                       et est conforme aux normes internationales en vigueur."
                .to_string(),
        }
    }
}

impl CompanyInfo {
    /// Address and contact lines under the company name.
    pub fn contact_lines(&self) -> Vec<String> {
        vec![
            self.activity.clone(),
            self.address.clone(),
            self.phone_fax.clone(),
        ]
    }

    pub fn bank_lines(&self) -> Vec<String> {
        vec![
            format!("Compte : {}", self.bank),
            format!("RIB : {}", self.rib),
            format!("e-mail : {}", self.email),
            format!("Site web : {}", self.website),
        ]
    }

    /// Registration numbers, below the separator rule.
    pub fn legal_lines(&self) -> Vec<String> {
        vec![
            format!("Rc : {}", self.rc),
            format!("A1 : {}", self.ai),
            format!("Id Fiscal : {}", self.fiscal_id),
            format!("NIS : {}", self.nis),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lines() {
        let company = CompanyInfo::default();
        assert_eq!(company.bank_lines()[1], "RIB : 0210002113000003042");
        assert_eq!(company.legal_lines()[3], "NIS : 099616010516338");
        assert!(company.warranty.starts_with("Notre matériel est garanti une année"));
        assert!(!company.warranty.contains("  "));
    }
}
