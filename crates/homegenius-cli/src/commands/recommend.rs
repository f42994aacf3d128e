use anyhow::{Result, bail};
use colored::Colorize;
use homegenius_application::AppContext;
use homegenius_core::locale::Label;
use homegenius_core::property::{Property, PropertyId};
use homegenius_core::recommendation::RecommendationFeedback;

use super::print_properties;

fn print_recommendations(context: &AppContext, properties: &[Property]) {
    println!("{}", context.locale().label(Label::Recommendations).bold());
    print_properties(properties, context.locale().active());
}

pub async fn for_user(
    context: &AppContext,
    user_id: Option<i64>,
    recommendation_type: Option<String>,
    limit: u32,
) -> Result<()> {
    let user_id = match user_id {
        Some(id) => id,
        None => match context.session().snapshot().await.user() {
            Some(user) => user.id,
            None => bail!("Not logged in; pass --user-id or run `homegenius login` first."),
        },
    };

    let properties = context
        .recommendations()
        .for_user(user_id, limit, recommendation_type.as_deref())
        .await?;
    print_recommendations(context, &properties);
    Ok(())
}

pub async fn style(context: &AppContext, keywords: &[String], limit: u32) -> Result<()> {
    let properties = context.recommendations().style_based(keywords, limit).await?;
    print_recommendations(context, &properties);
    Ok(())
}

pub async fn similar(context: &AppContext, id: PropertyId, limit: u32) -> Result<()> {
    let properties = context.recommendations().similar(id, limit).await?;
    print_recommendations(context, &properties);
    Ok(())
}

pub async fn trending(context: &AppContext, limit: u32) -> Result<()> {
    let properties = context.recommendations().trending(limit).await?;
    print_recommendations(context, &properties);
    Ok(())
}

pub async fn feedback(context: &AppContext, recommendation_id: i64, feedback: String) -> Result<()> {
    context
        .recommendations()
        .submit_feedback(&RecommendationFeedback {
            recommendation_id,
            feedback,
        })
        .await?;
    println!("{}", "Thanks for the feedback".green());
    Ok(())
}
