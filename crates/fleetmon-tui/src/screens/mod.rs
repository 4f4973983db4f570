//! Screen components.

pub mod assign;
pub mod balises;
pub mod dashboard;
pub mod reports;

use crate::component::Component;
use crate::screen::ScreenId;

/// Instantiate all primary screens in tab-bar order.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()) as Box<dyn Component>,
        ),
        (ScreenId::Balises, Box::new(balises::BalisesScreen::new())),
        (ScreenId::Reports, Box::new(reports::ReportsScreen::new())),
    ]
}
