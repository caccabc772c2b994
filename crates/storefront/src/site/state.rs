//! Per-visitor page state, UI events and their effects.

use chrono::NaiveDate;
use lowell_core::ProductId;

use crate::age_gate::{AgeGate, AgeGateError, BirthDateInput};
use crate::checkout::CheckoutMount;
use crate::growth::GrowthAnimation;
use crate::stores::{SearchTrigger, StoreLocator};

/// Scroll offset (px) past which the header is marked as scrolled.
pub const HEADER_SCROLL_OFFSET: u32 = 50;

/// Which of the two mutually exclusive views is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// The product sections.
    #[default]
    ProductList,
    /// A single product's detail section.
    Detail(ProductId),
}

/// Everything that varies between visitors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteState {
    pub gate: AgeGate,
    pub gate_error: Option<AgeGateError>,
    pub view: View,
    pub checkout: CheckoutMount,
    pub growth: Option<GrowthAnimation>,
    pub locator: Option<StoreLocator>,
    pub header_scrolled: bool,
}

impl SiteState {
    /// Whether the gated behaviors (growth animation, store locator) run.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.gate.is_verified()
    }
}

/// Input from the visitor.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The page was requested; `session_verified` is the stored flag.
    PageLoaded { session_verified: bool },
    /// The age form was submitted.
    SubmitAge {
        input: BirthDateInput,
        today: NaiveDate,
    },
    /// A product card's view button was activated.
    ViewProduct(ProductId),
    /// The detail view's back action.
    BackToShop,
    /// A store search was requested.
    SearchStores {
        query: String,
        trigger: SearchTrigger,
    },
    /// A growth marker's visible fraction changed.
    MarkerVisible { stage: String, ratio: f64 },
    /// The window scrolled.
    Scrolled { offset: u32 },
    /// The hero "Shop Now" button.
    HeroShopNow,
    /// The "Explore The Collection" button.
    ExploreCollection,
}

/// Side effects requested by a transition, executed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Store the verified flag in the session.
    PersistAgeVerified,
    /// Scroll the window to the top.
    ScrollToTop,
    /// Smooth-scroll to the element with this id.
    ScrollIntoView(&'static str),
}
