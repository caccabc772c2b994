//! Built-in catalog and store directory.
//!
//! Used when no `STOREFRONT_CATALOG_PATH` resource is configured.

use lowell_core::ProductId;

use super::Product;
use crate::stores::Store;

fn product(
    id: i32,
    name: &str,
    image: &str,
    price: &str,
    short_desc: &str,
    long_desc: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        image: image.to_string(),
        price: price.to_string(),
        short_desc: short_desc.to_string(),
        long_desc: long_desc.to_string(),
    }
}

fn store(name: &str, address: &str, phone: &str) -> Store {
    Store {
        name: name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
    }
}

/// The 20 products sold on the site.
#[must_use]
pub fn default_products() -> Vec<Product> {
    vec![
        product(
            1,
            "Lowell Eighth - Sativa",
            "product-flower-sativa.png",
            "$45",
            "An uplifting and energetic sativa strain.",
            "Our sun-grown Sativa flower is perfect for daytime use. Experience a burst of creativity and energy with this premium, all-natural cannabis. Grown pesticide-free in California.",
        ),
        product(
            2,
            "Lowell Eighth - Indica",
            "product-flower-indica.png",
            "$45",
            "A relaxing and calming indica strain.",
            "Cultivated for relaxation, our Indica flower helps soothe the mind and body. Ideal for evening use, this strain offers a peaceful and calming experience. All-natural and sun-grown.",
        ),
        product(
            3,
            "Lowell Quarter - Hybrid",
            "product-flower-hybrid.png",
            "$80",
            "A balanced hybrid for any time of day.",
            "Get the best of both worlds with our Hybrid flower. This balanced strain provides a gentle lift in mood followed by a wave of relaxation, making it suitable for any time of day.",
        ),
        product(
            4,
            "The Social Sativa Pack",
            "product-preroll-sativa.png",
            "$40",
            "Perfect for conversation and creativity.",
            "Our Social Sativa pre-rolls are crafted to inspire creativity and lively conversation. Each joint is packed with our finest sun-grown Sativa for a consistent, uplifting experience.",
        ),
        product(
            5,
            "The Creative Hybrid Pack",
            "product-preroll-hybrid.png",
            "$40",
            "Spark inspiration with this hybrid blend.",
            "This balanced hybrid blend is designed to spark inspiration and focus. Perfect for artists, writers, or anyone looking for a creative boost. Conveniently pre-rolled for your enjoyment.",
        ),
        product(
            6,
            "The Calming Indica Pack",
            "product-preroll-indica.png",
            "$40",
            "Unwind and de-stress with this indica pack.",
            "Let go of the day's stress with our Calming Indica pre-rolls. Each joint is filled with premium indica flower, perfect for deep relaxation and a restful night's sleep.",
        ),
        product(
            7,
            "The 35's Tall Pre-rolls",
            "product-preroll-35s.png",
            "$35",
            "A full-flavor experience in a convenient size.",
            "The 35's offer a full-flavor experience in a conveniently sized pre-roll. A perfectly balanced hybrid, these are ideal for any time, day or night. Comes in a pack of 10.",
        ),
        product(
            8,
            "Live Rosin Disposable Vape - Sativa",
            "product-vape-sativa.png",
            "$60",
            "Uplifting sativa live rosin disposable vape.",
            "Experience the pure, potent flavor of our Sativa live rosin in a discreet disposable vape. This solventless extract provides an energetic and uplifting effect, perfect for on-the-go.",
        ),
        product(
            9,
            "Live Rosin Disposable Vape - Indica",
            "product-vape-indica.png",
            "$60",
            "Relaxing indica live rosin disposable vape.",
            "Unwind anywhere with our Indica live rosin disposable vape. This all-natural, solventless extract delivers a calming and relaxing effect to help you de-stress and find your peace.",
        ),
        product(
            10,
            "Hash Rosin Disposable Vape - Hybrid",
            "product-vape-hybrid.png",
            "$65",
            "Balanced hybrid hash rosin disposable vape.",
            "Our premium Hash Rosin vape offers a balanced hybrid experience. Made from the finest ice-water hash, this vape provides a rich flavor profile and a perfectly moderated effect.",
        ),
        product(
            11,
            "Live Rosin Vape - Lemon Haze",
            "product-vape-sativa.png",
            "$60",
            "A zesty and uplifting sativa experience.",
            "Our Lemon Haze Sativa vape offers a burst of citrus flavor and an energetic, uplifting high. Perfect for creative pursuits and social gatherings, this live rosin is pure and potent.",
        ),
        product(
            12,
            "Live Rosin Vape - Blue Dream",
            "product-vape-hybrid.png",
            "$60",
            "A balanced and euphoric hybrid favorite.",
            "A legendary cross, Blue Dream balances full-body relaxation with gentle cerebral invigoration. This live rosin vape captures its sweet berry aroma and delivers a consistently smooth experience.",
        ),
        product(
            13,
            "Live Rosin Vape - GDP",
            "product-vape-indica.png",
            "$60",
            "A deeply relaxing and classic indica vape.",
            "Granddaddy Purple (GDP) is a famous indica known for its deep relaxation effects. This live rosin vape delivers a complex grape and berry aroma, perfect for unwinding at the end of the day.",
        ),
        product(
            14,
            "Hash Rosin Vape - Sour Diesel",
            "product-vape-sativa.png",
            "$65",
            "An energizing and pungent sativa hash vape.",
            "Experience the legendary Sour Diesel in a premium hash rosin format. Known for its pungent, diesel-like aroma, this sativa vape delivers fast-acting, energizing, and dreamy cerebral effects.",
        ),
        product(
            15,
            "Hash Rosin Vape - OG Kush",
            "product-vape-hybrid.png",
            "$65",
            "The legendary balanced OG Kush hybrid.",
            "A true classic, our OG Kush hash rosin vape provides the ultimate balanced high. With notes of fuel, skunk, and spice, it delivers a happy, hungry, and relaxed state of mind.",
        ),
        product(
            16,
            "Hash Rosin Vape - N. Lights",
            "product-vape-indica.png",
            "$65",
            "A soothing and dreamy indica hash vape.",
            "Northern Lights is a pure indica prized for its resinous buds and fast flowering. This hash rosin vape creates a comfortable laziness, relaxing muscles and pacifying the mind in dreamy euphoria.",
        ),
        product(
            17,
            "Melted Diamonds - Tropicana",
            "product-vape-sativa.png",
            "$70",
            "A potent and flavorful tropical sativa.",
            "Our Melted Diamonds vape is the pinnacle of potency. Tropicana Cookies delivers a cerebral, focused high with a burst of citrus notes, perfect for a sunny afternoon.",
        ),
        product(
            18,
            "Melted Diamonds - Gelato",
            "product-vape-hybrid.png",
            "$70",
            "A creamy and powerful dessert-like hybrid.",
            "A potent and flavorful hybrid, Gelato offers a euphoric high accompanied by strong feelings of relaxation. This Melted Diamonds vape has a sweet, dessert-like flavor profile.",
        ),
        product(
            19,
            "Melted Diamonds - Wedding Cake",
            "product-vape-indica.png",
            "$70",
            "A rich and tranquil indica for relaxation.",
            "Wedding Cake is a relaxing and euphoric indica-dominant hybrid. Our Melted Diamonds capture its tangy, sweet earth and pepper notes, providing a calming experience for body and mind.",
        ),
        product(
            20,
            "CBD Disposable Vape - Calm",
            "product-vape-hybrid.png",
            "$55",
            "A balanced CBD/THC blend for calmness.",
            "Find your center with our Calm vape. This carefully crafted 1:1 CBD to THC blend provides gentle relaxation without a strong psychoactive effect, ideal for daytime relief and focus.",
        ),
    ]
}

/// The 8 retail partners listed by the store locator.
#[must_use]
pub fn default_stores() -> Vec<Store> {
    vec![
        store("The Green Cross", "4218 Mission St, San Francisco, CA 94112", "(415) 648-4420"),
        store("SPARC on Haight", "1580 Haight St, San Francisco, CA 94117", "(415) 805-1085"),
        store(
            "MedMen - Los Angeles",
            "8208 Santa Monica Blvd, West Hollywood, CA 90046",
            "(323) 848-7981",
        ),
        store("Cookies Melrose", "8360 Melrose Ave #101, Los Angeles, CA 90069", "(323) 433-4743"),
        store("Urbn Leaf - San Diego", "1028 Buenos Ave, San Diego, CA 92110", "(619) 275-2235"),
        store("Golden State Canna", "2235 E 7th St, Long Beach, CA 90804", "(562) 283-3383"),
        store("Harborside - Oakland", "1840 Embarcadero, Oakland, CA 94606", "(888) 994-2726"),
        store("Atrium - Sacramento", "1900 19th St, Sacramento, CA 95811", "(916) 706-0336"),
    ]
}
