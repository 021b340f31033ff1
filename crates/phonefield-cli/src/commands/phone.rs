use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_user_id;
use anyhow::{Context as _, Result};
use clap::Args;
use phonefield_core::domain::{country_code, country_name};
use phonefield_core::{CoreError, PhoneDetails, PhoneError, PhoneQuery};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct DetailsArgs {
    pub number: String,
    /// Region code the number was entered for
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProperArgs {
    #[arg(required = true)]
    pub numbers: Vec<String>,
    /// User whose default country is used instead of the acting user's
    #[arg(long = "for", value_name = "USER_ID")]
    pub for_user: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegionsArgs {}

#[derive(Debug, Args)]
pub struct CountryArgs {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct ProperDto {
    input: String,
    number: Option<String>,
    error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct RegionDto {
    code: String,
    name: Option<&'static str>,
}

pub fn show_details(ctx: &Context<'_>, args: DetailsArgs) -> Result<()> {
    let query = to_query(args);
    let details = ctx
        .resolver()
        .get_details(&query, &ctx.session.language)
        .with_context(|| format!("no details for {}", query.raw_number))?;
    print_details(ctx, &details)
}

pub fn verify(ctx: &Context<'_>, args: DetailsArgs) -> Result<()> {
    let query = to_query(args);
    let details = ctx
        .resolver()
        .verify_number(&query, &ctx.session.language)
        .with_context(|| format!("verify {}", query.raw_number))?;
    print_details(ctx, &details)
}

pub fn proper(ctx: &Context<'_>, args: ProperArgs) -> Result<()> {
    let user = args.for_user.as_deref().map(parse_user_id).transpose()?;
    let resolver = ctx.resolver();

    let mut items = Vec::with_capacity(args.numbers.len());
    for input in args.numbers {
        let item = match resolver.proper_number(&input, user.as_ref(), &ctx.session) {
            Ok(number) => ProperDto {
                input,
                number: Some(number),
                error: None,
            },
            Err(err @ PhoneError::InvalidPhoneNumber) => ProperDto {
                input,
                number: None,
                error: Some(err.label()),
            },
            Err(err) => return Err(err).with_context(|| format!("normalize {}", input)),
        };
        items.push(item);
    }

    let failed = items.iter().filter(|item| item.number.is_none()).count();
    if ctx.json {
        print_json(&items)?;
    } else {
        for item in &items {
            match &item.number {
                Some(number) => println!("{}", number),
                None => eprintln!("invalid phone number: {}", item.input),
            }
        }
    }

    if failed > 0 {
        return Err(invalid_input(format!(
            "{} of {} numbers could not be normalized",
            failed,
            items.len()
        )));
    }
    Ok(())
}

pub fn list_regions(ctx: &Context<'_>, _args: RegionsArgs) -> Result<()> {
    let items: Vec<RegionDto> = ctx
        .resolver()
        .supported_regions()
        .into_iter()
        .map(|region| RegionDto {
            name: country_name(&region),
            code: region.to_string(),
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    for item in items {
        println!("{}\t{}", item.code, item.name.unwrap_or("-"));
    }
    Ok(())
}

pub fn lookup_country(ctx: &Context<'_>, args: CountryArgs) -> Result<()> {
    let region =
        country_code(&args.name).ok_or_else(|| CoreError::UnknownCountry(args.name.clone()))?;

    if ctx.json {
        print_json(&RegionDto {
            name: country_name(&region),
            code: region.to_string(),
        })?;
    } else {
        println!("{}", region);
    }
    Ok(())
}

fn to_query(args: DetailsArgs) -> PhoneQuery {
    let query = PhoneQuery::new(args.number);
    match args.country {
        Some(country) => query.with_country(country),
        None => query,
    }
}

fn print_details(ctx: &Context<'_>, details: &PhoneDetails) -> Result<()> {
    if ctx.json {
        return print_json(details);
    }

    println!("number: {}", details.formatted_number);
    match &details.region_code {
        Some(region) => println!("country: {}", region),
        None => println!("country: -"),
    }
    println!("geocoding: {}", or_dash(&details.geocoding));
    println!("carrier: {}", or_dash(&details.carrier));
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
