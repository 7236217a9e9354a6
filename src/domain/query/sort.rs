use crate::domain::entities::record::Entity;
use crate::domain::entities::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventorySort {
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
    YearNewest,
    MileageLowest,
}

impl InventorySort {
    pub const ALL: [InventorySort; 5] = [
        InventorySort::Newest,
        InventorySort::PriceLowToHigh,
        InventorySort::PriceHighToLow,
        InventorySort::YearNewest,
        InventorySort::MileageLowest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InventorySort::Newest => "Newest Arrivals",
            InventorySort::PriceLowToHigh => "Price: Low to High",
            InventorySort::PriceHighToLow => "Price: High to Low",
            InventorySort::YearNewest => "Year: Newest",
            InventorySort::MileageLowest => "Mileage: Lowest",
        }
    }
}

pub fn sort_inventory(vehicles: &mut [Vehicle], order: InventorySort) {
    match order {
        InventorySort::Newest => vehicles.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        InventorySort::PriceLowToHigh => vehicles.sort_by(|a, b| a.price.total_cmp(&b.price)),
        InventorySort::PriceHighToLow => vehicles.sort_by(|a, b| b.price.total_cmp(&a.price)),
        InventorySort::YearNewest => vehicles.sort_by(|a, b| b.year.cmp(&a.year)),
        InventorySort::MileageLowest => vehicles.sort_by_key(|v| v.mileage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_orders_are_mirror_images() {
        let mut vehicles = vec![
            Vehicle::new(2020, "Ford", "Focus", 15000.0),
            Vehicle::new(2023, "BMW", "X3", 48000.0),
            Vehicle::new(2021, "Kia", "Rio", 12000.0),
        ];
        sort_inventory(&mut vehicles, InventorySort::PriceLowToHigh);
        assert_eq!(vehicles[0].make, "Kia");
        sort_inventory(&mut vehicles, InventorySort::PriceHighToLow);
        assert_eq!(vehicles[0].make, "BMW");
        sort_inventory(&mut vehicles, InventorySort::YearNewest);
        assert_eq!(vehicles[2].make, "Ford");
    }
}
