//! Validated product search criteria.
//!
//! Every enumerated field is a closed set of literals. The literals are the exact strings the
//! catalog index stores, so `as_str` doubles as the facet value.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Declares a closed enumeration whose variants each map to one exact literal.
macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $literal:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $literal),+
                }
            }

            /// Exact, case-sensitive match against the literal set
            pub fn from_literal(value: &str) -> Option<Self> {
                match value {
                    $($literal => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> { serializer.serialize_str(self.as_str()) }
        }
    };
}

closed_enum! {
    /// Top-level catalog category
    Category {
        Tops => "Tops",
        Bottoms => "Bottoms",
        Dresses => "Dresses",
        Outerwear => "Outerwear",
        Shoes => "Shoes",
        Accessories => "Accessories",
        Bags => "Bags",
        Underwear => "Underwear",
        Swimwear => "Swimwear",
        Activewear => "Activewear",
        Other => "Other",
    }
}

closed_enum! {
    /// Fine-grained catalog category. Grouped by parent category below, but a sub-category is
    /// never checked against the category it is submitted with.
    SubCategory {
        // Tops
        TShirts => "T-Shirts",
        PoloShirts => "Polo Shirts",
        TankTops => "Tank Tops",
        Blouses => "Blouses",
        DressShirts => "Dress Shirts",
        Henleys => "Henleys",
        Sweatshirts => "Sweatshirts",
        Hoodies => "Hoodies",
        CropTops => "Crop Tops",
        Tunics => "Tunics",
        // Bottoms
        Jeans => "Jeans",
        Chinos => "Chinos",
        DressPants => "Dress Pants",
        Joggers => "Joggers",
        Leggings => "Leggings",
        Shorts => "Shorts",
        CargoPants => "Cargo Pants",
        Skirts => "Skirts",
        Capris => "Capris",
        Overalls => "Overalls",
        // Dresses
        CasualDresses => "Casual Dresses",
        EveningGowns => "Evening Gowns",
        CocktailDresses => "Cocktail Dresses",
        MaxiDresses => "Maxi Dresses",
        MiniDresses => "Mini Dresses",
        BodyconDresses => "Bodycon Dresses",
        WrapDresses => "Wrap Dresses",
        ShirtDresses => "Shirt Dresses",
        Sundresses => "Sundresses",
        WorkDresses => "Work Dresses",
        // Outerwear
        Jackets => "Jackets",
        Blazers => "Blazers",
        Coats => "Coats",
        TrenchCoats => "Trench Coats",
        Parkas => "Parkas",
        BomberJackets => "Bomber Jackets",
        LeatherJackets => "Leather Jackets",
        DenimJackets => "Denim Jackets",
        Cardigans => "Cardigans",
        Vests => "Vests",
        // Shoes
        Sneakers => "Sneakers",
        Boots => "Boots",
        Sandals => "Sandals",
        Loafers => "Loafers",
        Heels => "Heels",
        Flats => "Flats",
        Wedges => "Wedges",
        Espadrilles => "Espadrilles",
        Oxfords => "Oxfords",
        Slippers => "Slippers",
        // Bags
        Backpacks => "Backpacks",
        ToteBags => "Tote Bags",
        CrossbodyBags => "Crossbody Bags",
        Clutches => "Clutches",
        ShoulderBags => "Shoulder Bags",
        MessengerBags => "Messenger Bags",
        Satchels => "Satchels",
        DuffleBags => "Duffle Bags",
        BeltBags => "Belt Bags",
        LaptopBags => "Laptop Bags",
        // Accessories
        HatsAndCaps => "Hats & Caps",
        Scarves => "Scarves",
        Gloves => "Gloves",
        Belts => "Belts",
        TiesAndBowties => "Ties & Bowties",
        Watches => "Watches",
        Jewelry => "Jewelry",
        Sunglasses => "Sunglasses",
        Wallets => "Wallets",
        HairAccessories => "Hair Accessories",
        // Underwear
        Boxers => "Boxers",
        Briefs => "Briefs",
        Trunks => "Trunks",
        Bras => "Bras",
        Panties => "Panties",
        Camisoles => "Camisoles",
        ThermalUnderwear => "Thermal Underwear",
        Shapewear => "Shapewear",
        Bralettes => "Bralettes",
        Lingerie => "Lingerie",
        // Swimwear
        Bikinis => "Bikinis",
        OnePieceSwimsuits => "One-Piece Swimsuits",
        Tankinis => "Tankinis",
        SwimTrunks => "Swim Trunks",
        Boardshorts => "Boardshorts",
        RashGuards => "Rash Guards",
        SwimDresses => "Swim Dresses",
        Monokinis => "Monokinis",
        SwimSkirts => "Swim Skirts",
        CoverUps => "Cover-Ups",
        // Activewear (Leggings, Tank Tops, Joggers and Hoodies are shared with the groups above)
        GymShorts => "Gym Shorts",
        SportsBras => "Sports Bras",
        Tracksuits => "Tracksuits",
        CompressionWear => "Compression Wear",
        AthleticTShirts => "Athletic T-Shirts",
        YogaPants => "Yoga Pants",
        // Other
        CustomWear => "Custom Wear",
        Uniforms => "Uniforms",
        Costumes => "Costumes",
        MaternityWear => "Maternity Wear",
        Workwear => "Workwear",
        EthnicWear => "Ethnic Wear",
        FestivalOutfits => "Festival Outfits",
        SeasonalClothing => "Seasonal Clothing",
        Vintage => "Vintage",
        Miscellaneous => "Miscellaneous",
    }
}

closed_enum! {
    Gender {
        Men => "Men",
        Women => "Women",
        Unisex => "Unisex",
    }
}

closed_enum! {
    Condition {
        New => "new",
        Used => "used",
    }
}

closed_enum! {
    /// Listing currency, as displayed to buyers
    Currency {
        Usd => "$ USD",
        Euro => "€ EURO",
        Ngn => "₦ NGN",
    }
}

impl Default for Currency {
    fn default() -> Self { Currency::Ngn }
}

closed_enum! {
    /// Result ordering. Each order is served by a pre-sorted replica of the catalog index.
    SortOrder {
        Popular => "Popular",
        Newest => "Newest",
        Oldest => "Oldest",
        PriceHighToLow => "PriceHighToLow",
        PriceLowToHigh => "PriceLowToHigh",
    }
}

impl SortOrder {
    /// Suffix appended to the base index name to address this order's replica
    pub fn index_suffix(&self) -> &'static str {
        match self {
            SortOrder::Newest => "_createdAt_desc",
            SortOrder::Oldest => "_createdAt_asc",
            SortOrder::Popular => "_popular_desc",
            SortOrder::PriceHighToLow => "_price_desc",
            SortOrder::PriceLowToHigh => "_price_asc",
        }
    }

    /// The record attribute the replica is sorted by
    pub fn sort_field(&self) -> &'static str {
        match self {
            SortOrder::Newest | SortOrder::Oldest => "createdAt",
            SortOrder::Popular => "popular",
            SortOrder::PriceHighToLow | SortOrder::PriceLowToHigh => "price",
        }
    }

    pub fn is_descending(&self) -> bool { matches!(self, SortOrder::Newest | SortOrder::Popular | SortOrder::PriceHighToLow) }
}

closed_enum! {
    LetteredSize {
        OneSize => "One Size",
        Xs => "XS",
        S => "S",
        M => "M",
        L => "L",
        Xl => "XL",
        Xxl => "XXL",
    }
}

// `\d` would also admit non-ASCII digits
static NUMERIC_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("numeric size pattern is valid"));

/// A garment size: one of the lettered sizes, or a numeric size such as a shoe or waist size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Size {
    Lettered(LetteredSize),
    Numeric(String),
}

impl Size {
    pub fn parse(token: &str) -> Option<Size> {
        if let Some(lettered) = LetteredSize::from_literal(token) {
            return Some(Size::Lettered(lettered));
        }
        NUMERIC_SIZE.is_match(token).then(|| Size::Numeric(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Size::Lettered(size) => size.as_str(),
            Size::Numeric(digits) => digits,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> { serializer.serialize_str(self.as_str()) }
}

/// Structured product search criteria, built per request from validated input.
///
/// No cross-field checks are made: an inverted price range, or a sub-category outside the
/// chosen categories, is accepted as given.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Ordered by declaration so that equal sets compare and compile identically
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<BTreeSet<Category>>,
    /// Accepted and carried, but not compiled into any clause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<SubCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<Size>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl FilterSpec {
    pub fn new() -> Self { Self::default() }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.category = Some(categories.into_iter().collect());
        self
    }

    pub fn sub_category(mut self, sub_category: SubCategory) -> Self {
        self.sub_category = Some(sub_category);
        self
    }

    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn min_discount(mut self, percentage: f64) -> Self {
        self.discount_percentage = Some(percentage);
        self
    }

    pub fn sizes(mut self, sizes: impl IntoIterator<Item = Size>) -> Self {
        self.size = Some(sizes.into_iter().collect());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }
}
