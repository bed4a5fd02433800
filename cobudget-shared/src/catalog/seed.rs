/// Built-in grocery catalog
///
/// Loaded into an empty `products` table at startup and by the init endpoint.
/// Prices are whole rupees.

use rust_decimal::Decimal;

use crate::models::product::{CreateProduct, Tags};

/// One entry of the built-in catalog
#[derive(Debug, Clone, Copy)]
pub struct SeedProduct {
    pub id: &'static str,
    pub name: &'static str,
    pub price: i64,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub image_url: &'static str,
}

impl SeedProduct {
    pub fn to_create(&self) -> CreateProduct {
        CreateProduct {
            id: self.id.to_string(),
            name: self.name.to_string(),
            price: Decimal::from(self.price),
            category: self.category.to_string(),
            tags: Tags::new(self.tags.iter().copied()),
            description: Some(format!("Quality {} from Walmart", self.name)),
            image_url: Some(self.image_url.to_string()),
            in_stock: true,
        }
    }
}

pub const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: "FV001",
        name: "Fresh Bananas",
        price: 45,
        category: "Fruits & Vegetables",
        tags: &["fruits", "fresh", "organic", "bananas"],
        image_url: "https://www.bbassets.com/media/uploads/p/l/10000027_32-fresho-banana-robusta.jpg",
    },
    SeedProduct {
        id: "FV002",
        name: "Red Apples",
        price: 180,
        category: "Fruits & Vegetables",
        tags: &["fruits", "apples", "fresh", "red"],
        image_url: "https://www.bbassets.com/media/uploads/p/l/40033819_35-fresho-apple-shimla.jpg",
    },
    SeedProduct {
        id: "FV003",
        name: "Spinach Leaves",
        price: 65,
        category: "Fruits & Vegetables",
        tags: &["vegetables", "greens", "spinach", "fresh"],
        image_url: "https://sahajaaharam.com/files/Spinach.jpg",
    },
    SeedProduct {
        id: "FV004",
        name: "Carrots",
        price: 55,
        category: "Fruits & Vegetables",
        tags: &["vegetables", "carrots", "fresh", "orange"],
        image_url: "https://suttindseeds.in/wp-content/uploads/2023/02/CARROT-F-1-INDIAN-RED-2.jpg",
    },
    SeedProduct {
        id: "BF001",
        name: "Cerelac Baby Cereal",
        price: 275,
        category: "Baby Food",
        tags: &["baby", "cereal", "nutrition", "cerelac"],
        image_url: "https://images.squarespace-cdn.com/content/v1/577d692d2e69cff0a51027a9/1472987610185-D0XJN161KLDZQR6N1WG1/Cerelac.JPG",
    },
    SeedProduct {
        id: "BF002",
        name: "Baby Diapers Size M",
        price: 890,
        category: "Baby Food",
        tags: &["baby", "diapers", "hygiene", "medium"],
        image_url: "https://gpsretail.in/wp-content/uploads/2024/11/teddy.jpg",
    },
    SeedProduct {
        id: "BF003",
        name: "Baby Wipes",
        price: 145,
        category: "Baby Food",
        tags: &["baby", "wipes", "gentle", "cleaning"],
        image_url: "https://www.healthklin.com/image/cache/catalog/PRODUCTIMAGES/mee-mee-wipes-72-pcs-225x350.jpg",
    },
    SeedProduct {
        id: "BS001",
        name: "Kellogg's Corn Flakes",
        price: 285,
        category: "Breakfast & Sauces",
        tags: &["cereal", "breakfast", "kelloggs", "cornflakes"],
        image_url: "https://nagabazaar.com/cdn/shop/files/Kelloggs-Corn-Flakes-with-Real-Strawberry-Puree-300g.jpg",
    },
    SeedProduct {
        id: "BS002",
        name: "Maggi Tomato Ketchup",
        price: 125,
        category: "Breakfast & Sauces",
        tags: &["sauce", "ketchup", "maggi", "tomato"],
        image_url: "https://www.onionz.in/uploads/items/655de0b0c2d11c1df7f500c74b2a706e.jpg",
    },
    SeedProduct {
        id: "BS003",
        name: "Kissan Mixed Fruit Jam",
        price: 165,
        category: "Breakfast & Sauces",
        tags: &["jam", "fruit", "spread", "kissan"],
        image_url: "https://m.media-amazon.com/images/I/81QlwJRj53L.jpg",
    },
    SeedProduct {
        id: "CE001",
        name: "Surf Excel Detergent",
        price: 345,
        category: "Cleaning Essentials",
        tags: &["detergent", "washing", "clothes", "surf"],
        image_url: "https://cdn.grofers.com/da/cms-assets/cms/product/42ea51e6-8154-4bb0-9d29-18cc53896ecb.jpg",
    },
    SeedProduct {
        id: "CE002",
        name: "Lizol Floor Cleaner",
        price: 185,
        category: "Cleaning Essentials",
        tags: &["cleaner", "floor", "disinfectant", "lizol"],
        image_url: "https://gharstuff.com/wp-content/uploads/2020/08/Lizol-Floral-Floor-Cleaner-500ml.jpg",
    },
    SeedProduct {
        id: "CE003",
        name: "Vim Dishwash Liquid",
        price: 95,
        category: "Cleaning Essentials",
        tags: &["dishwash", "liquid", "cleaning", "vim"],
        image_url: "https://www.bbassets.com/media/uploads/p/l/900459772_4-vim-dishwash-liquid-gel.jpg",
    },
    SeedProduct {
        id: "AR001",
        name: "Aashirvaad Whole Wheat Atta",
        price: 485,
        category: "Atta, Rice, Oil & Dals",
        tags: &["atta", "wheat", "flour", "aashirvaad"],
        image_url: "https://www.bbassets.com/media/uploads/p/l/126903_12-aashirvaad-atta-whole-wheat.jpg",
    },
    SeedProduct {
        id: "AR002",
        name: "Basmati Rice 5kg",
        price: 725,
        category: "Atta, Rice, Oil & Dals",
        tags: &["rice", "basmati", "grain", "cooking"],
        image_url: "https://bf1af2.akinoncloudcdn.com/products/2024/09/09/71598/8ad31a32-4715-4142-8f62-2a6c0d714f50.jpg",
    },
    SeedProduct {
        id: "AR003",
        name: "Fortune Sunflower Oil",
        price: 650,
        category: "Atta, Rice, Oil & Dals",
        tags: &["oil", "cooking", "sunflower", "fortune"],
        image_url: "https://m.media-amazon.com/images/I/81FbVYZJYyL.jpg",
    },
    SeedProduct {
        id: "AR004",
        name: "Toor Dal",
        price: 185,
        category: "Atta, Rice, Oil & Dals",
        tags: &["dal", "lentils", "protein", "toor"],
        image_url: "https://dhatuorganics.com/wp-content/uploads/2025/01/Organic-Toor-Dal-front.jpg",
    },
    SeedProduct {
        id: "DB001",
        name: "Amul Fresh Milk",
        price: 65,
        category: "Dairy, Bread & Eggs",
        tags: &["milk", "dairy", "fresh", "amul"],
        image_url: "https://gharstuff.com/wp-content/uploads/2019/03/Amul-Gold-Milk-500ml.jpg",
    },
    SeedProduct {
        id: "DB002",
        name: "Britannia Bread",
        price: 35,
        category: "Dairy, Bread & Eggs",
        tags: &["bread", "loaf", "britannia", "wheat"],
        image_url: "https://cdn.grofers.com/da/cms-assets/cms/product/8622bfed-5e2d-415d-8a85-99c5fb7bac04.jpg",
    },
    SeedProduct {
        id: "DB003",
        name: "Farm Fresh Eggs",
        price: 125,
        category: "Dairy, Bread & Eggs",
        tags: &["eggs", "protein", "fresh", "dozen"],
        image_url: "https://shop.purityprayag.com/cdn/shop/products/HitaFarmsOrganic-6-Eggs-F.jpg",
    },
    SeedProduct {
        id: "TC001",
        name: "Tata Tea Gold",
        price: 425,
        category: "Tea, Coffee & More",
        tags: &["tea", "tata", "premium", "beverage"],
        image_url: "https://mcprod.spencers.in/media/catalog/product/1/0/1008950_4.jpg",
    },
    SeedProduct {
        id: "TC002",
        name: "Nescafe Instant Coffee",
        price: 285,
        category: "Tea, Coffee & More",
        tags: &["coffee", "instant", "nescafe", "beverage"],
        image_url: "https://essentials.my/wp-content/uploads/2021/08/nescafe-gold-soluble-coffee-100g-min-1.jpg",
    },
    SeedProduct {
        id: "MD001",
        name: "MDH Garam Masala",
        price: 85,
        category: "Masala & Dry Fruits",
        tags: &["spices", "masala", "cooking", "mdh"],
        image_url: "https://kohinoorfoods.ca/cdn/shop/products/MDH_garam_masala.jpg",
    },
    SeedProduct {
        id: "MD002",
        name: "Almonds 250g",
        price: 485,
        category: "Masala & Dry Fruits",
        tags: &["nuts", "almonds", "dry fruits", "healthy"],
        image_url: "https://www.suvidhasupermart.com/uploads/suvidha-supermart/products/nutraj-california-almonds-250g-441455_l.jpg",
    },
    SeedProduct {
        id: "MD003",
        name: "Cashews 200g",
        price: 565,
        category: "Masala & Dry Fruits",
        tags: &["nuts", "cashews", "dry fruits", "premium"],
        image_url: "https://cdn.grofers.com/app/images/products/sliding_image/527969a.jpg",
    },
    SeedProduct {
        id: "CD001",
        name: "Coca Cola 1.25L",
        price: 65,
        category: "Cold Drinks & Juices",
        tags: &["cola", "soft drink", "beverage", "coca"],
        image_url: "https://5.imimg.com/data5/QA/WB/WF/SELLER-14933844/coca-cola-cold-drink-500x500.jpg",
    },
    SeedProduct {
        id: "CD002",
        name: "Real Orange Juice",
        price: 125,
        category: "Cold Drinks & Juices",
        tags: &["juice", "orange", "real", "fresh"],
        image_url: "https://m.media-amazon.com/images/I/61lYCT3C-7L.jpg",
    },
    SeedProduct {
        id: "BI001",
        name: "Parle-G Biscuits",
        price: 25,
        category: "Biscuits",
        tags: &["biscuits", "parle", "glucose", "snack"],
        image_url: "https://img.clevup.in/277874/SKU-3231_0-1742396696089.jpg",
    },
    SeedProduct {
        id: "BI002",
        name: "Oreo Cookies",
        price: 55,
        category: "Biscuits",
        tags: &["cookies", "oreo", "chocolate", "cream"],
        image_url: "https://m.media-amazon.com/images/I/51WQR3qg9vL.jpg",
    },
    SeedProduct {
        id: "SC001",
        name: "Cadbury Dairy Milk",
        price: 85,
        category: "Sweet Cravings",
        tags: &["chocolate", "cadbury", "sweet", "dairy milk"],
        image_url: "https://springs.com.pk/cdn/shop/files/CDM-90G.jpg",
    },
    SeedProduct {
        id: "SC002",
        name: "Haldiram's Gulab Jamun",
        price: 165,
        category: "Sweet Cravings",
        tags: &["sweets", "gulab jamun", "haldirams", "dessert"],
        image_url: "https://assets.giftalove.com/resources/common/giftimages/largeimage/haldiram-gulab-jamun.jpg",
    },
    SeedProduct {
        id: "MU001",
        name: "Lay's Potato Chips",
        price: 25,
        category: "Munchies",
        tags: &["chips", "snacks", "lays", "potato"],
        image_url: "https://www.quickpantry.in/cdn/shop/products/lay-s-chile-limon-potato-chips-32-g-quick-pantry.jpg",
    },
    SeedProduct {
        id: "MU002",
        name: "Kurkure Masala Munch",
        price: 20,
        category: "Munchies",
        tags: &["snacks", "kurkure", "spicy", "munch"],
        image_url: "https://aamaderbazar.com/wp-content/uploads/2024/03/kurkure-masala-munch-chips-40-gm.jpg",
    },
    SeedProduct {
        id: "MB001",
        name: "Lakme Foundation",
        price: 565,
        category: "Makeup & Beauty",
        tags: &["makeup", "foundation", "lakme", "beauty"],
        image_url: "https://www.lakmeindia.com/cdn/shop/files/24135_S1-8901030995255_800x.jpg",
    },
    SeedProduct {
        id: "MB002",
        name: "Himalaya Face Wash",
        price: 125,
        category: "Makeup & Beauty",
        tags: &["skincare", "face wash", "himalaya", "natural"],
        image_url: "https://5.imimg.com/data5/SELLER/Default/2020/12/MS/LV/GZ/120430256/himalaya-face-wash-500x500.jpg",
    },
    SeedProduct {
        id: "HG001",
        name: "Colgate Toothpaste",
        price: 85,
        category: "Hygiene & Grooming",
        tags: &["toothpaste", "dental", "colgate", "oral care"],
        image_url: "https://www.sabziadda.com/wp-content/uploads/2021/02/Colgate-Maxfresh-Spicy-Fresh-Toothpaste.jpg",
    },
    SeedProduct {
        id: "HG002",
        name: "Head & Shoulders Shampoo",
        price: 265,
        category: "Hygiene & Grooming",
        tags: &["shampoo", "hair care", "head shoulders", "dandruff"],
        image_url: "https://5.imimg.com/data5/SELLER/Default/2022/1/TD/AS/SE/6235227/head-and-shoulders-hair-shampoo.jpg",
    },
    SeedProduct {
        id: "FF001",
        name: "Amul Ice Cream",
        price: 185,
        category: "Frozen Food & Ice Creams",
        tags: &["ice cream", "frozen", "amul", "dessert"],
        image_url: "https://5.imimg.com/data5/OW/WE/MY-30494656/amul-realmilk-ice-cream.jpg",
    },
    SeedProduct {
        id: "FF002",
        name: "McCain Fries",
        price: 225,
        category: "Frozen Food & Ice Creams",
        tags: &["frozen", "fries", "mccain", "potato"],
        image_url: "https://nlmaconline.com/cdn/shop/products/MCCAINCajunFront.jpg",
    },
    SeedProduct {
        id: "MF001",
        name: "Fresh Chicken 1kg",
        price: 285,
        category: "Meats, Fish & Eggs",
        tags: &["chicken", "fresh", "meat", "protein"],
        image_url: "https://dailygroceryshop.com/wp-content/uploads/2020/05/Chicken-curry-dailygroceryshop.jpg",
    },
    SeedProduct {
        id: "MF002",
        name: "Fish Fillets",
        price: 385,
        category: "Meats, Fish & Eggs",
        tags: &["fish", "seafood", "fillets", "protein"],
        image_url: "https://fooppers.in/wp-content/uploads/2021/05/Basa-Fish-Fillets-Online-450x450.jpg",
    },
    SeedProduct {
        id: "BB001",
        name: "Dove Soap",
        price: 65,
        category: "Bath & Body",
        tags: &["soap", "bath", "dove", "moisturizing"],
        image_url: "https://petracarestore.com/wp-content/uploads/2023/11/petracare-image-264.jpg",
    },
    SeedProduct {
        id: "BB002",
        name: "Nivea Body Lotion",
        price: 185,
        category: "Bath & Body",
        tags: &["lotion", "body care", "nivea", "moisturizer"],
        image_url: "https://5.imimg.com/data5/EH/DU/SN/SELLER-100106295/body-lotion-500x500.jpg",
    },
    SeedProduct {
        id: "HB001",
        name: "Vicks VapoRub",
        price: 125,
        category: "Health & Baby Care",
        tags: &["health", "vicks", "cold relief", "balm"],
        image_url: "https://online-pharmacy4u.co.uk/cdn/shop/products/vicks_vaporub_1_1.jpg",
    },
    SeedProduct {
        id: "HB002",
        name: "Dettol Antiseptic",
        price: 145,
        category: "Health & Baby Care",
        tags: &["antiseptic", "dettol", "disinfectant", "health"],
        image_url: "https://rapidtestkit.com.my/wp-content/uploads/2022/02/dettol-antiseptic-germicide-liquid-500ml.jpeg",
    },
    SeedProduct {
        id: "HN001",
        name: "Philips LED Bulb",
        price: 285,
        category: "Home Needs",
        tags: &["bulb", "led", "philips", "lighting"],
        image_url: "https://5.imimg.com/data5/SELLER/Default/2024/3/404191839/TA/QY/MH/107262425/philips-steller-light-500x500.jpg",
    },
    SeedProduct {
        id: "HN002",
        name: "Godrej Air Freshener",
        price: 125,
        category: "Home Needs",
        tags: &["air freshener", "godrej", "fragrance", "home"],
        image_url: "https://www.urbangroc.com/wp-content/uploads/2022/05/godrej-aer-cool-freshner.jpg",
    },
    SeedProduct {
        id: "EA001",
        name: "Samsung Phone Charger",
        price: 785,
        category: "Electricals & Accessories",
        tags: &["charger", "samsung", "phone", "electronics"],
        image_url: "https://image-us.samsung.com/SamsungUS/home/mobile/mobile-accessories/pdp/ep-ta20jweusta/features/Flexibility_121316.jpg",
    },
    SeedProduct {
        id: "EA002",
        name: "Boat Earphones",
        price: 1285,
        category: "Electricals & Accessories",
        tags: &["earphones", "boat", "audio", "wireless"],
        image_url: "https://m.media-amazon.com/images/I/51JM8TpHVSL.jpg",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let ids: HashSet<&str> = SEED_PRODUCTS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), SEED_PRODUCTS.len());
    }

    #[test]
    fn test_seed_products_are_well_formed() {
        for product in SEED_PRODUCTS {
            assert!(product.price > 0, "{} has no price", product.id);
            assert!(!product.tags.is_empty(), "{} has no tags", product.id);
            assert!(product.id.len() <= 50);
            assert!(product.category.len() <= 50, "{} category too long", product.id);
            assert!(product.image_url.starts_with("https://"));
        }
    }

    #[test]
    fn test_seed_description() {
        let milk = SEED_PRODUCTS.iter().find(|p| p.id == "DB001").unwrap();
        let create = milk.to_create();
        assert_eq!(create.name, "Amul Fresh Milk");
        assert_eq!(create.price, Decimal::from(65));
        assert_eq!(
            create.description.as_deref(),
            Some("Quality Amul Fresh Milk from Walmart")
        );
        assert!(create.in_stock);
    }
}
