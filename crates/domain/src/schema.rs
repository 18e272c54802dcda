// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity and attribute names used by the contract line workflows.
//!
//! These are the logical names the data service knows the records by.

/// Child bid records.
pub mod bid {
    pub const ENTITY: &str = "opportunity";
    pub const ID: &str = "opportunityid";
    pub const TITLE: &str = "name";
    pub const AMOUNT: &str = "contractamount";
    pub const LEVEL: &str = "selectedlevel";
    pub const NUMBER: &str = "opportunitynbr";
    pub const SITE: &str = "siteid";
    pub const SITE_GUID: &str = "siteguid";
    pub const GUID: &str = "opportunityguid";
    pub const IS_MASTER: &str = "ismasterbid";
    pub const LINE_CREATED: &str = "firstcontractlinecreated";
    pub const CONTRACT_NUMBER: &str = "svccontractnbr";
}

/// Product catalog entries.
pub mod product {
    pub const ENTITY: &str = "product";
    pub const ID: &str = "productid";
    pub const NAME: &str = "name";
}

/// Site records are accounts.
pub mod site {
    pub const ENTITY: &str = "account";
}

/// Attributes written onto a synthesized contract line.
pub mod contract_line {
    pub const TITLE: &str = "title";
    pub const ACTIVE_ON: &str = "activeon";
    pub const EXPIRES_ON: &str = "expireson";
    pub const CUSTOMER: &str = "customerid";
    pub const PRICE: &str = "price";
    pub const PRODUCT: &str = "productid";
    pub const SELF_ID: &str = "contractlineguid";
    pub const RELATED_BID: &str = "nar_relatedbidid";
    pub const SITE: &str = "siteid";
}

/// Jurisdiction-keyed lien deadline reference rows.
pub mod lien_deadline {
    pub const ENTITY: &str = "liendeadlines";
    pub const LOCATION_STATE: &str = "locationstate";
    pub const SUB_DEADLINE_DAYS: &str = "subdeadlinedays";
}
