use crate::domain::listing::Listing;

/// Placeholder used when a listing has no description text.
const NO_DESCRIPTION: &str = "No Description";

fn description_text(listing: &Listing) -> &str {
    match listing.description.as_deref() {
        Some(d) if !d.trim().is_empty() => d,
        _ => NO_DESCRIPTION,
    }
}

/// Field block shared by both prompts.
fn listing_fields(listing: &Listing) -> String {
    format!(
        "Title: {title}\n\
         Price: {price}\n\
         Type: {property_type}\n\
         Bedrooms: {bedrooms}\n\
         Bathrooms: {bathrooms}\n\
         Area: {area} sqft\n\
         Location: {address}, {city}, {state}, {zip}\n\
         Description: {description}",
        title = listing.title,
        price = listing.price_display(),
        property_type = listing.property_type,
        bedrooms = listing.bedrooms,
        bathrooms = listing.bathrooms,
        area = listing.area_sqft,
        address = listing.address,
        city = listing.city,
        state = listing.state,
        zip = listing.zip_code,
        description = description_text(listing),
    )
}

/// System prompt for the chat-about-listing flow.
pub fn chat_system_prompt(listing: &Listing) -> String {
    format!(
        "You are a helpful real estate assistant. Here are the property details:\n\
         {fields}\n\
         Answer questions about this property helpfully and briefly.\n\
         Be persuasive on why to buy this property and provide facts about the listing.\n\
         If there are any questions about inventory, mention to navigate to the Listings \
         page or use AI Advanced Search to find the ideal property.\n\
         Do not provide more than 100 words.",
        fields = listing_fields(listing),
    )
}

/// System prompt for the search flow: the full catalog, then the
/// instruction block asking for a JSON reply.
pub fn search_system_prompt(listings: &[Listing], query: &str) -> String {
    let mut prompt = String::from(
        "You are a real estate assistant. Here are the available properties:\n\n",
    );

    for listing in listings {
        prompt.push_str(&format!(
            "Property ID: {id}\n{fields}\n--------------------------------------\n",
            id = listing.id,
            fields = listing_fields(listing),
        ));
    }

    prompt.push_str(&format!(
        "\nBased on this request: {query}\n\
         Recommend suitable properties and respond with:\n\
         1. A helpful message explaining the recommendation.\n\
         2. List of Property IDs of recommended properties as numbers only.\n\
         Format: Respond with JSON like:\n\
         {{\"message\": \"Your helpful message here\", \"property_ids\": [1,2,3]}}",
    ));

    prompt
}
