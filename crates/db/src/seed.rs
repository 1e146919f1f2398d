//! Demo catalog and order history for a fresh database.
//!
//! Runs only when the catalog is empty, so it is safe to call on every
//! startup with `SEED_DEMO_DATA=true`.

use chrono::Duration;
use watchstore_core::order_status::OrderStatus;
use watchstore_core::types::Timestamp;

use crate::models::order::{CreateOrder, CreateOrderItem};
use crate::models::product::{CreateProduct, Product};
use crate::repositories::{OrderRepo, ProductRepo};
use crate::DbPool;

/// Rows written by [`seed_demo_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: usize,
    pub orders: usize,
}

struct DemoProduct {
    name: &'static str,
    name_en: &'static str,
    brand: &'static str,
    category: &'static str,
    price: f64,
    old_price: Option<f64>,
    description: &'static str,
    features: &'static [&'static str],
    image: &'static str,
    featured: bool,
    rating: f64,
}

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "ساعة رولكس ديت جست",
        name_en: "Rolex Datejust",
        brand: "رولكس",
        category: "فاخرة",
        price: 450_000.0,
        old_price: Some(520_000.0),
        description: "ساعة رولكس ديت جست الكلاسيكية بإطار من الذهب الأبيض وسوار جوبيلي.",
        features: &["حركة أوتوماتيكية", "مقاومة للماء 100م", "كريستال ياقوتي", "تقويم تاريخ"],
        image: "https://images.unsplash.com/photo-1587836374828-4dbafa94cf0e?w=600",
        featured: true,
        rating: 4.9,
    },
    DemoProduct {
        name: "ساعة أوميغا سيماستر",
        name_en: "Omega Seamaster",
        brand: "أوميغا",
        category: "فاخرة",
        price: 280_000.0,
        old_price: None,
        description: "ساعة أوميغا سيماستر بتصميم رياضي أنيق ومقاومة للماء حتى 300 متر.",
        features: &["حركة أوتوماتيكية", "مقاومة للماء 300م", "إطار سيراميكي"],
        image: "https://images.unsplash.com/photo-1523170335258-f5ed11844a49?w=600",
        featured: true,
        rating: 4.8,
    },
    DemoProduct {
        name: "ساعة كارتييه تانك",
        name_en: "Cartier Tank",
        brand: "كارتييه",
        category: "فاخرة",
        price: 380_000.0,
        old_price: Some(420_000.0),
        description: "ساعة كارتييه تانك الأيقونية بتصميمها المستطيل الفريد.",
        features: &["حركة كوارتز", "جلد تمساح أصلي", "كريستال ياقوتي"],
        image: "https://images.unsplash.com/photo-1548171916-c8d1f4c993c4?w=600",
        featured: true,
        rating: 4.7,
    },
    DemoProduct {
        name: "ساعة تاغ هوير كاريرا",
        name_en: "TAG Heuer Carrera",
        brand: "تاغ هوير",
        category: "رياضية",
        price: 195_000.0,
        old_price: None,
        description: "ساعة تاغ هوير كاريرا الرياضية مع كرونوغراف مستوحاة من سباقات السيارات.",
        features: &["كرونوغراف", "حركة أوتوماتيكية", "تاكيميتر"],
        image: "https://images.unsplash.com/photo-1539874754764-5a96559165b0?w=600",
        featured: false,
        rating: 4.6,
    },
    DemoProduct {
        name: "ساعة كاسيو جي شوك",
        name_en: "Casio G-Shock",
        brand: "كاسيو",
        category: "رياضية",
        price: 8_500.0,
        old_price: Some(12_000.0),
        description: "ساعة كاسيو جي شوك المتينة والمصممة لتحمل الصدمات.",
        features: &["مقاومة للصدمات", "مقاومة للماء 200م", "إضاءة LED"],
        image: "https://images.unsplash.com/photo-1533139502658-0198f920d8e8?w=600",
        featured: false,
        rating: 4.5,
    },
    DemoProduct {
        name: "ساعة سيكو بريساج",
        name_en: "Seiko Presage",
        brand: "سيكو",
        category: "كلاسيكية",
        price: 22_000.0,
        old_price: None,
        description: "ساعة سيكو بريساج بميناء مستوحى من فن الخزف الياباني.",
        features: &["حركة أوتوماتيكية", "ميناء مينا", "كريستال مقوى"],
        image: "https://images.unsplash.com/photo-1522312346375-d1a52e2b99b3?w=600",
        featured: false,
        rating: 4.4,
    },
    DemoProduct {
        name: "ساعة أبل ألترا 2",
        name_en: "Apple Watch Ultra 2",
        brand: "أبل",
        category: "ذكية",
        price: 45_000.0,
        old_price: None,
        description: "ساعة أبل ألترا 2 الذكية بهيكل من التيتانيوم وبطارية تدوم طويلا.",
        features: &["GPS مزدوج", "هيكل تيتانيوم", "مقاومة للماء 100م"],
        image: "https://images.unsplash.com/photo-1434494878577-86c23bcb06b9?w=600",
        featured: true,
        rating: 4.8,
    },
];

struct DemoOrder {
    customer: &'static str,
    phone: &'static str,
    city: &'static str,
    address: &'static str,
    /// Product names from [`DEMO_PRODUCTS`] with quantities.
    lines: &'static [(&'static str, i32)],
    status: OrderStatus,
    days_ago: i64,
}

const DEMO_ORDERS: &[DemoOrder] = &[
    DemoOrder {
        customer: "محمد أحمد",
        phone: "+222 36 12 34 56",
        city: "نواكشوط",
        address: "تفرغ زينه",
        lines: &[("ساعة رولكس ديت جست", 1)],
        status: OrderStatus::Completed,
        days_ago: 40,
    },
    DemoOrder {
        customer: "أحمد محمود",
        phone: "+222 46 78 90 12",
        city: "نواكشوط",
        address: "الميناء",
        lines: &[("ساعة تاغ هوير كاريرا", 1), ("ساعة أوميغا سيماستر", 1)],
        status: OrderStatus::OutForDelivery,
        days_ago: 3,
    },
    DemoOrder {
        customer: "فاطمة بنت سيدي",
        phone: "+222 22 33 44 55",
        city: "نواذيبو",
        address: "المركز",
        lines: &[("ساعة أبل ألترا 2", 2)],
        status: OrderStatus::Pending,
        days_ago: 1,
    },
    DemoOrder {
        customer: "عبد الله ولد محمد",
        phone: "+222 41 22 33 44",
        city: "نواكشوط",
        address: "كرفور",
        lines: &[("ساعة كارتييه تانك", 1)],
        status: OrderStatus::Cancelled,
        days_ago: 5,
    },
    DemoOrder {
        customer: "مريم بنت أحمد",
        phone: "+222 33 44 55 66",
        city: "نواكشوط",
        address: "السبخة",
        lines: &[("ساعة سيكو بريساج", 1), ("ساعة كاسيو جي شوك", 2)],
        status: OrderStatus::Completed,
        days_ago: 0,
    },
];

/// Insert the demo catalog and orders if the catalog is empty.
///
/// Orders are backdated relative to `now` so both analytics windows have data.
pub async fn seed_demo_data(pool: &DbPool, now: Timestamp) -> Result<SeedSummary, sqlx::Error> {
    if ProductRepo::count(pool).await? > 0 {
        tracing::debug!("Catalog not empty, skipping demo seed");
        return Ok(SeedSummary::default());
    }

    let mut products: Vec<Product> = Vec::with_capacity(DEMO_PRODUCTS.len());
    for demo in DEMO_PRODUCTS {
        let input = CreateProduct {
            name: Some(demo.name.to_string()),
            name_en: Some(demo.name_en.to_string()),
            brand: Some(demo.brand.to_string()),
            category: Some(demo.category.to_string()),
            price: Some(demo.price),
            old_price: demo.old_price,
            description: Some(demo.description.to_string()),
            features: Some(demo.features.iter().map(|f| f.to_string()).collect()),
            images: Some(vec![demo.image.to_string()]),
            in_stock: Some(true),
            featured: Some(demo.featured),
            rating: Some(demo.rating),
        };
        products.push(ProductRepo::create(pool, &input).await?);
    }

    let mut orders = 0;
    for demo in DEMO_ORDERS {
        let items = resolve_lines(demo.lines, &products)?;
        let total = items.iter().map(|i| i.price * f64::from(i.quantity)).sum();

        let input = CreateOrder {
            customer: demo.customer.to_string(),
            phone: demo.phone.to_string(),
            email: None,
            city: demo.city.to_string(),
            address: demo.address.to_string(),
            notes: None,
            total,
            placed_at: now - Duration::days(demo.days_ago),
            items,
        };
        let created = OrderRepo::create(pool, &input).await?;
        if demo.status != OrderStatus::INITIAL {
            OrderRepo::update_status(pool, created.order.id, demo.status).await?;
        }
        orders += 1;
    }

    tracing::info!(products = products.len(), orders, "Seeded demo data");
    Ok(SeedSummary {
        products: products.len(),
        orders,
    })
}

/// Turn demo `(product name, quantity)` lines into order items.
///
/// A name with no seeded product fails the seed instead of writing an
/// order with missing lines.
fn resolve_lines(
    lines: &[(&str, i32)],
    products: &[Product],
) -> Result<Vec<CreateOrderItem>, sqlx::Error> {
    lines
        .iter()
        .map(|(name, quantity)| {
            let Some(product) = products.iter().find(|p| p.name == *name) else {
                tracing::error!(product = %name, "Demo order references an unknown product");
                return Err(sqlx::Error::RowNotFound);
            };
            Ok(CreateOrderItem {
                product_id: Some(product.id),
                name: product.name.clone(),
                price: product.price,
                image: product.primary_image().map(str::to_string),
                quantity: *quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;
    use sqlx::types::Json;

    use super::*;

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            name_en: None,
            brand: None,
            category: "sport".to_string(),
            price,
            old_price: None,
            description: None,
            features: Json(vec![]),
            images: Json(vec!["g-shock.jpg".to_string()]),
            in_stock: true,
            featured: false,
            rating: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn every_demo_line_names_a_demo_product() {
        for order in DEMO_ORDERS {
            for (name, quantity) in order.lines {
                assert!(
                    DEMO_PRODUCTS.iter().any(|p| p.name == *name),
                    "no demo product named {name}"
                );
                assert!(*quantity > 0);
            }
        }
    }

    #[test]
    fn lines_copy_product_fields() {
        let products = vec![product(7, "G-Shock", 85.0)];
        let items = resolve_lines(&[("G-Shock", 2)], &products).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, Some(7));
        assert_eq!(items[0].price, 85.0);
        assert_eq!(items[0].image.as_deref(), Some("g-shock.jpg"));
    }

    #[test]
    fn unknown_product_fails() {
        let products = vec![product(7, "G-Shock", 85.0)];
        let result = resolve_lines(&[("G-Shock", 1), ("Speedmaster", 1)], &products);
        assert_matches!(result, Err(sqlx::Error::RowNotFound));
    }
}
