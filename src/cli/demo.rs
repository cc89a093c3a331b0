use chrono::{Duration, NaiveDate};

use crate::categorizer::CategoryMap;
use crate::cli::{output, parse_today};
use crate::error::Result;
use crate::models::RawEmail;
use crate::pipeline::{self, RunOptions};

struct SampleEmail {
    subject: &'static str,
    sender: &'static str,
    /// `{expires}` is replaced with a date `expires_in` days from today.
    body: &'static str,
    expires_in: i64,
}

const SAMPLES: &[SampleEmail] = &[
    SampleEmail {
        subject: "Southwest Airlines - Flash Sale: 40% Off All Flights This Weekend!",
        sender: "deals@southwest.com",
        body: "Don't miss out! Book your dream vacation now.\n\
               Use promo code FLIGHT40 at checkout to save 40% off on all domestic \
               and international flights. This incredible offer expires {expires}.\n\
               Valid for travel through December.",
        expires_in: 1,
    },
    SampleEmail {
        subject: "Papa John's - Buy One Get One Free",
        sender: "promotions@papajohns.com",
        body: "We're celebrating our anniversary with an amazing deal:\n\
               Buy 1 large pizza, get 1 FREE!\n\
               Order online with code BOGO2024\n\
               Offer valid until {expires}\n\
               Free delivery on orders over $20",
        expires_in: 6,
    },
    SampleEmail {
        subject: "Nordstrom - Your exclusive 25% discount awaits",
        sender: "offers@nordstrom.com",
        body: "As a thank you for being part of our community, here's an exclusive \
               discount just for you: Save 25% on your entire purchase at our store.\n\
               Use code: SAVE25NOW\n\
               Shop clothing, accessories, home goods and more.\n\
               Ends: {expires}",
        expires_in: 13,
    },
    SampleEmail {
        subject: "Ticketmaster - Last Chance: Concert Tickets $50 Off",
        sender: "events@ticketmaster.com",
        body: "The show is almost here!\n\
               Get $50 off tickets to the Summer Music Festival using code MUSIC50\n\
               Limited time offer - valid through {expires}\n\
               All genres, all venues. Don't miss this amazing event!",
        expires_in: 0,
    },
    SampleEmail {
        subject: "Target - Free Shipping + 15% Off Your Order",
        sender: "promotions@target.com",
        body: "This week only: Enjoy FREE SHIPPING on all orders plus an extra 15% off \
               when you spend $75 or more.\n\
               Code: SHIP15FREE\n\
               Expiration: {expires}",
        expires_in: 3,
    },
    SampleEmail {
        subject: "Expedia - Cyber Monday Travel Deals - Up to 60% Savings",
        sender: "deals@expedia.com",
        body: "We've slashed prices on thousands of flights and hotel packages.\n\
               Save up to 60% off regular prices on select routes.\n\
               Use promo code CYBER60 for maximum savings\n\
               Book by {expires}\n\
               Book your airline tickets now!",
        expires_in: 11,
    },
    SampleEmail {
        subject: "DoorDash - 50% Off All Menu Items - Limited Time!",
        sender: "offers@doordash.com",
        body: "For the next 48 hours, get 50% OFF everything on our menu!\n\
               Enter FEAST50 at checkout.\n\
               Valid on all restaurant delivery orders\n\
               Hurry - expires {expires}",
        expires_in: 2,
    },
    SampleEmail {
        subject: "Best Buy - Special Offer Inside - No Code Needed!",
        sender: "deals@bestbuy.com",
        body: "Surprise! We're giving you 20% off automatically.\n\
               No coupon code needed - discount applied at checkout\n\
               Shop now and save on our entire collection\n\
               This offer ends {expires}",
        expires_in: 5,
    },
];

pub fn sample_emails(today: NaiveDate) -> Vec<RawEmail> {
    SAMPLES
        .iter()
        .map(|s| {
            let expires = (today + Duration::days(s.expires_in))
                .format("%B %-d, %Y")
                .to_string();
            RawEmail::new(&s.body.replace("{expires}", &expires), s.subject, s.sender)
        })
        .collect()
}

pub fn run(today: Option<&str>, json: bool) -> Result<()> {
    let today = parse_today(today)?;
    let emails = sample_emails(today);
    let records = pipeline::run(&emails, &CategoryMap::builtin(), RunOptions::new(today))?;

    if !json {
        println!("Scanned {} sample emails.\n", emails.len());
    }
    output::render(&records, json)
}
