// vendor-search-rs/src/seed.rs
// Sample vendors loaded by the seed route. Kept as raw JSON so seeding goes
// through the same normalization as user-submitted records.

use serde_json::{json, Value};

pub fn sample_vendors() -> Vec<Value> {
    vec![
        json!({
            "name": "DJ Snake Beats",
            "category": "DJ/Music",
            "description": "High-energy DJ specializing in EDM and Bollywood fusion. Perfect for college fests and youth events.",
            "specialties": ["EDM", "Bollywood", "Remixes"],
            "style": "Energetic, Modern, Party Vibe",
            "priceRange": "$$$",
            "rating": 4.8,
            "contact": "djsnake@example.com"
        }),
        json!({
            "name": "Royal Catering Co.",
            "category": "Catering",
            "description": "Specializes in spicy street food with rustic stall setups. Authentic Indian flavors.",
            "specialties": ["Street Food", "Indian Cuisine", "Spicy"],
            "style": "Rustic, Authentic, Casual",
            "priceRange": "$$",
            "rating": 4.6,
            "contact": "royal@example.com"
        }),
        json!({
            "name": "Candid Moments Photography",
            "category": "Photography",
            "description": "Captures candid, moody shots with artistic flair. Specializes in emotional storytelling.",
            "specialties": ["Candid", "Moody", "Artistic"],
            "style": "Dark, Emotional, Cinematic",
            "priceRange": "$$$",
            "rating": 4.9,
            "phoneNumber": "+91 98234-56789",
            "highlights": ["Award-winning wedding photographer", "Featured in Vogue India", "Expert in low-light conditions"],
            "teamInfo": "Led by Rohan, a cinematic visionary with 12 years of experience in capturing raw emotions.",
            "personalDetails": { "yearsExp": 12, "location": "Mumbai, Pan-India", "teamSize": 5 }
        }),
        json!({
            "name": "Neon Dreams Decor",
            "category": "Decoration",
            "description": "Cyberpunk and futuristic themes with neon lights and LED installations.",
            "specialties": ["Neon", "Cyberpunk", "LED"],
            "style": "Futuristic, Bold, Vibrant",
            "priceRange": "$$$$",
            "rating": 4.7,
            "phoneNumber": "+91 98765-43210",
            "highlights": ["Pioneers of LED-driven decor", "Custom 3D-mapped stage designs", "Eco-friendly lighting solutions"],
            "teamInfo": "A collective of light engineers and digital artists pushing the boundaries of event aesthetics.",
            "personalDetails": { "yearsExp": 8, "location": "Bangalore, NCR", "teamSize": 15 }
        }),
        json!({
            "name": "Classic Strings Orchestra",
            "category": "Music",
            "description": "Elegant classical music ensemble for weddings and formal events.",
            "specialties": ["Classical", "Live Music", "Elegant"],
            "style": "Sophisticated, Traditional, Elegant",
            "priceRange": "$$$",
            "rating": 4.8,
            "phoneNumber": "+91 91234-56789",
            "highlights": ["Graduates from Royal Academy of Music", "Performed for 500+ premium weddings", "Custom arrangements of modern pop hits"],
            "teamInfo": "Directed by Sarah, a world-class violinist with a passion for acoustic excellence.",
            "personalDetails": { "yearsExp": 20, "location": "Delhi, Rajasthan", "teamSize": 12 }
        }),
        json!({
            "name": "Spice Route Catering",
            "category": "Catering",
            "description": "Pan-Asian fusion cuisine with modern presentation. Perfect for corporate events.",
            "specialties": ["Asian Fusion", "Modern", "Corporate"],
            "style": "Contemporary, Sophisticated, Clean",
            "priceRange": "$$$",
            "rating": 4.5,
            "phoneNumber": "+91 93456-78901",
            "highlights": ["Michelin-starred background chefs", "Organic, locally sourced ingredients", "Interactive live counters"],
            "teamInfo": "Chef Vikram brings 15 years of culinary expertise from across South-East Asia.",
            "personalDetails": { "yearsExp": 15, "location": "Pan-India", "teamSize": 40 }
        }),
        json!({
            "name": "Vintage Vibes Decor",
            "category": "Decoration",
            "description": "Rustic vintage decorations with wooden elements and warm lighting.",
            "specialties": ["Vintage", "Rustic", "Warm"],
            "style": "Nostalgic, Cozy, Earthy",
            "priceRange": "$$",
            "rating": 4.6,
            "phoneNumber": "+91 94567-89012",
            "highlights": ["Antique prop sourcing", "Custom hand-crafted wooden furniture", "Sustainable decor practices"],
            "teamInfo": "Anjali and her team are dedicated to bringing old-world charm to modern settings.",
            "personalDetails": { "yearsExp": 6, "location": "Pune, Goa", "teamSize": 10 }
        }),
        json!({
            "name": "TechSound Pro",
            "category": "Sound & Lighting",
            "description": "Professional sound systems and dynamic lighting for large-scale events.",
            "specialties": ["Sound Systems", "Stage Lighting", "Technical"],
            "style": "Professional, High-Tech, Reliable",
            "priceRange": "$$$",
            "rating": 4.9,
            "phoneNumber": "+91 95678-90123",
            "highlights": ["Dolby Atmos certified setups", "Tour-grade lighting equipment", "Zero-failure track record"],
            "teamInfo": "Run by tech enthusiasts certified in architectural acoustics and stage engineering.",
            "personalDetails": { "yearsExp": 10, "location": "NCR, Hyderabad", "teamSize": 25 }
        }),
        json!({
            "name": "Bollywood Beats DJ",
            "category": "DJ/Music",
            "description": "Specializes in Bollywood hits and retro classics. Great for weddings.",
            "specialties": ["Bollywood", "Retro", "Wedding"],
            "style": "Traditional, Festive, Energetic",
            "priceRange": "$$",
            "rating": 4.4,
            "phoneNumber": "+91 96789-01234",
            "highlights": ["Resident DJ at top Mumbai clubs", "Interactive crowd-engagement style", "Extensive retro vinyl collection"],
            "teamInfo": "DJ Amit has been the life of the party for over a decade in the Indian wedding circuit.",
            "personalDetails": { "yearsExp": 11, "location": "Mumbai, Gujarat", "teamSize": 3 }
        }),
        json!({
            "name": "Green Plate Catering",
            "category": "Catering",
            "description": "Organic, vegan, and health-conscious menu options with beautiful presentation.",
            "specialties": ["Vegan", "Organic", "Healthy"],
            "style": "Clean, Modern, Sustainable",
            "priceRange": "$$$",
            "rating": 4.7,
            "contact": "greenplate@example.com"
        }),
    ]
}
