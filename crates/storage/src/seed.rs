use crate::StoredProduct;

/// Default dessert menu served by a fresh server.
pub fn seed_products() -> Vec<StoredProduct> {
    vec![
        StoredProduct::new("1", "Waffle with Berries", "Waffle", 650),
        StoredProduct::new("2", "Vanilla Bean Crème Brûlée", "Crème Brûlée", 700),
        StoredProduct::new("3", "Macaron Mix of Five", "Macaron", 800),
        StoredProduct::new("4", "Classic Tiramisu", "Tiramisu", 550),
        StoredProduct::new("5", "Pistachio Baklava", "Baklava", 400),
        StoredProduct::new("6", "Lemon Meringue Pie", "Pie", 500),
        StoredProduct::new("7", "Red Velvet Cake", "Cake", 450),
        StoredProduct::new("8", "Salted Caramel Brownie", "Brownie", 450),
        StoredProduct::new("9", "Vanilla Panna Cotta", "Panna Cotta", 650),
        StoredProduct::new("10", "Chicken Waffle", "Waffle", 100),
    ]
}
