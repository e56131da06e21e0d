//! User Entity
//!
//! A registered account. The role is not a free-form field: it is derived from
//! the [`Account`] variant, which also carries the role-specific state.

use chrono::{DateTime, Utc};
use kernel::{error::validation::ValidationError, id::UserId};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};

// ============================================================================
// Role-specific state
// ============================================================================

/// Largest loyalty balance (the `INTEGER` column's range)
pub const MAX_LOYALTY_POINTS: u32 = i32::MAX as u32;

/// Customer-only state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerProfile {
    loyalty_points: u32,
    shipping_address: Option<String>,
}

impl CustomerProfile {
    pub fn new(
        loyalty_points: u32,
        shipping_address: Option<String>,
    ) -> Result<Self, ValidationError> {
        if loyalty_points > MAX_LOYALTY_POINTS {
            return Err(ValidationError::new(
                "loyalty_points",
                "Loyalty points exceed the maximum balance",
            ));
        }
        Ok(Self {
            loyalty_points,
            shipping_address,
        })
    }

    pub fn loyalty_points(&self) -> u32 {
        self.loyalty_points
    }

    pub fn shipping_address(&self) -> Option<&str> {
        self.shipping_address.as_deref()
    }

    /// Returns the new balance, which stops at [`MAX_LOYALTY_POINTS`]
    pub fn add_loyalty_points(&mut self, points: u32) -> u32 {
        self.loyalty_points = self
            .loyalty_points
            .saturating_add(points)
            .min(MAX_LOYALTY_POINTS);
        self.loyalty_points
    }

    /// Deducts `points` if the balance covers them
    pub fn redeem_loyalty_points(&mut self, points: u32) -> bool {
        if points <= self.loyalty_points {
            self.loyalty_points -= points;
            true
        } else {
            false
        }
    }

    pub fn update_shipping_address(&mut self, address: impl Into<String>) {
        self.shipping_address = Some(address.into());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminLevel {
    #[default]
    Super,
}

/// Admin-only state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminProfile {
    pub admin_level: AdminLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Customer(CustomerProfile),
    Admin(AdminProfile),
}

impl Account {
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Customer => Account::Customer(CustomerProfile::default()),
            UserRole::Admin => Account::Admin(AdminProfile::default()),
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Account::Customer(_) => UserRole::Customer,
            Account::Admin(_) => UserRole::Admin,
        }
    }
}

// ============================================================================
// Dashboard / permissions
// ============================================================================

const CUSTOMER_FEATURES: &[&str] = &[
    "Browse Shoes",
    "My Cart",
    "Order History",
    "Track Orders",
    "My Profile",
];

const ADMIN_FEATURES: &[&str] = &[
    "Manage Inventory",
    "View All Orders",
    "Manage Users",
    "Sales Analytics",
    "Product Management",
    "System Settings",
];

const CUSTOMER_PERMISSIONS: &[&str] = &[
    "view_products",
    "search_products",
    "add_to_cart",
    "manage_cart",
    "place_order",
    "view_own_orders",
    "track_orders",
    "update_profile",
    "view_loyalty_points",
];

const ADMIN_PERMISSIONS: &[&str] = &[
    "view_products",
    "add_to_cart",
    "place_order",
    "view_own_orders",
    "manage_inventory",
    "add_products",
    "edit_products",
    "delete_products",
    "view_all_orders",
    "manage_orders",
    "view_analytics",
    "manage_users",
    "system_settings",
];

/// Role-specific landing payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    #[serde(rename = "type")]
    pub kind: UserRole,
    pub username: String,
    pub message: String,
    pub features: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_level: Option<AdminLevel>,
}

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone)]
pub struct User {
    id: Option<UserId>,
    username: UserName,
    password: UserPassword,
    email: Option<Email>,
    created_at: DateTime<Utc>,
    account: Account,
}

impl User {
    /// Create a user that has not been stored yet
    pub fn new(
        username: UserName,
        password: UserPassword,
        email: Option<Email>,
        role: UserRole,
    ) -> Self {
        Self {
            id: None,
            username,
            password,
            email,
            created_at: Utc::now(),
            account: Account::for_role(role),
        }
    }

    /// Rebuild a stored user
    pub fn restore(
        id: UserId,
        username: UserName,
        password: UserPassword,
        email: Option<Email>,
        created_at: DateTime<Utc>,
        account: Account,
    ) -> Self {
        Self {
            id: Some(id),
            username,
            password,
            email,
            created_at,
            account,
        }
    }

    /// Record the id assigned by the store
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn password(&self) -> &UserPassword {
        &self.password
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn role(&self) -> UserRole {
        self.account.role()
    }

    /// Customer state, if this is a customer account
    pub fn customer_mut(&mut self) -> Option<&mut CustomerProfile> {
        match &mut self.account {
            Account::Customer(profile) => Some(profile),
            Account::Admin(_) => None,
        }
    }

    pub fn set_email(&mut self, email: Option<Email>) {
        self.email = email;
    }

    /// Replace the stored digest (used when upgrading legacy hashes)
    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
    }

    pub fn dashboard(&self) -> Dashboard {
        let username = self.username.to_string();
        match &self.account {
            Account::Customer(profile) => Dashboard {
                kind: UserRole::Customer,
                message: format!("Welcome back, {username}!"),
                username,
                features: CUSTOMER_FEATURES.to_vec(),
                loyalty_points: Some(profile.loyalty_points),
                admin_level: None,
            },
            Account::Admin(profile) => Dashboard {
                kind: UserRole::Admin,
                message: "Admin Control Panel - D-Money's Shoe World".to_string(),
                username,
                features: ADMIN_FEATURES.to_vec(),
                loyalty_points: None,
                admin_level: Some(profile.admin_level),
            },
        }
    }

    pub fn permissions(&self) -> &'static [&'static str] {
        match self.account {
            Account::Customer(_) => CUSTOMER_PERMISSIONS,
            Account::Admin(_) => ADMIN_PERMISSIONS,
        }
    }

    /// Dictionary form without the password digest
    pub fn to_dict(&self) -> UserDict {
        let (loyalty_points, shipping_address, admin_level) = match &self.account {
            Account::Customer(profile) => (
                Some(profile.loyalty_points),
                profile.shipping_address.clone(),
                None,
            ),
            Account::Admin(profile) => (None, None, Some(profile.admin_level)),
        };

        UserDict {
            id: self.id.map(|id| id.get()),
            username: self.username.to_string(),
            email: self.email.as_ref().map(|e| e.to_string()),
            role: Some(self.role().code().to_string()),
            created_at: Some(self.created_at),
            loyalty_points,
            shipping_address,
            admin_level,
            password_hash: None,
        }
    }

    /// Rebuild from a dictionary; `password_hash` is mandatory, role defaults to customer
    pub fn from_dict(dict: UserDict) -> Result<Self, ValidationError> {
        let username = UserName::new(&dict.username)?;

        let stored = dict
            .password_hash
            .ok_or_else(|| ValidationError::new("password_hash", "Password hash is required"))?;
        let password = UserPassword::from_db(stored)
            .map_err(|_| ValidationError::new("password_hash", "Invalid password hash"))?;

        let role = match dict.role.as_deref() {
            Some(code) => code.parse::<UserRole>()?,
            None => UserRole::default(),
        };

        let account = match role {
            UserRole::Customer => Account::Customer(CustomerProfile::new(
                dict.loyalty_points.unwrap_or(0),
                dict.shipping_address,
            )?),
            UserRole::Admin => Account::Admin(AdminProfile {
                admin_level: dict.admin_level.unwrap_or_default(),
            }),
        };

        let email = Email::parse_optional(dict.email.as_deref())?;

        Ok(Self {
            id: dict.id.map(UserId::new),
            username,
            password,
            email,
            created_at: dict.created_at.unwrap_or_else(Utc::now),
            account,
        })
    }
}

/// Serialized user
///
/// `password_hash` is accepted on input but never written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDict {
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_level: Option<AdminLevel>,
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn user(name: &str, role: UserRole) -> User {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        User::new(
            UserName::new(name).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            None,
            role,
        )
    }

    #[test]
    fn test_role_is_derived_from_account() {
        assert_eq!(user("alice", UserRole::Customer).role(), UserRole::Customer);
        assert_eq!(user("bob", UserRole::Admin).role(), UserRole::Admin);
    }

    #[test]
    fn test_loyalty_points() {
        let mut alice = user("alice", UserRole::Customer);
        let profile = alice.customer_mut().unwrap();

        assert_eq!(profile.add_loyalty_points(50), 50);
        assert!(!profile.redeem_loyalty_points(80));
        assert!(profile.redeem_loyalty_points(30));
        assert_eq!(profile.loyalty_points(), 20);

        assert_eq!(profile.add_loyalty_points(u32::MAX), MAX_LOYALTY_POINTS);
        assert!(profile.redeem_loyalty_points(MAX_LOYALTY_POINTS - 20));

        profile.update_shipping_address("1 Main St");
        assert_eq!(profile.shipping_address(), Some("1 Main St"));
    }

    #[test]
    fn test_admin_has_no_customer_profile() {
        let mut bob = user("bob", UserRole::Admin);
        assert!(bob.customer_mut().is_none());
    }

    #[test]
    fn test_dashboard_and_permissions_by_role() {
        let alice = user("alice", UserRole::Customer);
        let dashboard = alice.dashboard();
        assert_eq!(dashboard.message, "Welcome back, alice!");
        assert_eq!(dashboard.loyalty_points, Some(0));
        assert!(!alice.permissions().contains(&"add_products"));

        let bob = user("bob", UserRole::Admin);
        assert_eq!(bob.dashboard().admin_level, Some(AdminLevel::Super));
        assert!(bob.permissions().contains(&"add_products"));
    }

    #[test]
    fn test_to_dict_omits_password_hash() {
        let alice = user("alice", UserRole::Customer).with_id(UserId::new(3));
        let json = serde_json::to_value(alice.to_dict()).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["role"], "customer");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_from_dict_requires_password_hash() {
        let dict = user("alice", UserRole::Customer).to_dict();
        let err = User::from_dict(dict).unwrap_err();
        assert_eq!(err.field(), "password_hash");
    }

    #[test]
    fn test_dict_roundtrip_with_hash() {
        let bob = user("bob", UserRole::Admin).with_id(UserId::new(9));
        let mut dict = bob.to_dict();
        dict.password_hash = Some(bob.password().as_str().to_string());

        let restored = User::from_dict(dict).unwrap();
        assert_eq!(restored.id(), Some(UserId::new(9)));
        assert_eq!(restored.username().as_str(), "bob");
        assert_eq!(restored.role(), UserRole::Admin);
        assert_eq!(restored.created_at(), bob.created_at());
    }

    #[test]
    fn test_from_dict_defaults_role_to_customer() {
        let source = user("carol", UserRole::Customer);
        let dict = UserDict {
            id: None,
            username: "carol".to_string(),
            email: None,
            role: None,
            created_at: None,
            loyalty_points: Some(12),
            shipping_address: None,
            admin_level: None,
            password_hash: Some(source.password().as_str().to_string()),
        };

        let restored = User::from_dict(dict).unwrap();
        assert_eq!(restored.role(), UserRole::Customer);
        assert_eq!(restored.dashboard().loyalty_points, Some(12));
    }

    #[test]
    fn test_loyalty_balance_must_fit_storage() {
        let err = CustomerProfile::new(MAX_LOYALTY_POINTS + 1, None).unwrap_err();
        assert_eq!(err.field(), "loyalty_points");
        assert!(CustomerProfile::new(MAX_LOYALTY_POINTS, None).is_ok());

        let source = user("dave", UserRole::Customer);
        let dict = UserDict {
            loyalty_points: Some(u32::MAX),
            password_hash: Some(source.password().as_str().to_string()),
            ..source.to_dict()
        };
        assert_eq!(User::from_dict(dict).unwrap_err().field(), "loyalty_points");
    }
}
