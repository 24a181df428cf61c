//! Canned reply texts.
//!
//! Bullets and blank lines are part of the text and are shown verbatim.

pub const WEEKEND_PLANS: &str = "Based on your interests and past activities, here are some suggestions for this weekend:\n\n\
• Visit that new coffee shop you bookmarked\n\
• Call Sarah - you haven't talked in a while\n\
• Try that hiking trail you mentioned wanting to explore\n\
• Work on your photography project\n\n\
Would you like me to help you plan any of these activities?";

pub const BIRTHDAY_LOOKUP: &str = "I see you have some upcoming birthdays:\n\n\
• Mom's birthday is in 8 days (January 20th)\n\
• Sarah's birthday is next month (February 15th)\n\n\
Would you like me to help you plan something special for any of these occasions?";

pub const MEMORY_RECALL: &str = "You've been quite active lately! This past month you created 12 memories including:\n\n\
• Beach weekend with Alex and Jordan\n\
• Project launch celebration\n\
• Coffee date with Sarah\n\
• Several work achievements\n\n\
Your most joyful memory was the surprise party - you seemed really happy that day! Is there a particular memory you'd like to revisit or discuss?";

pub const MOTIVATIONAL_QUOTE: &str = "Here's a quote that matches your recent accomplishments:\n\n\
\"Success is not just about what you accomplish in your life, it's about what you inspire others to do.\" \n\n\
You've been doing great with maintaining your relationships and capturing important moments. Keep up the wonderful work of being present in your life!";

pub const ORGANIZATION_TIPS: &str = "Great question! Based on your current habits, here are some personalized organization tips:\n\n\
• You're already doing well with memory tracking - keep that up!\n\
• Consider setting weekly reminders to call family members\n\
• Use your photo memories to create monthly highlights\n\
• Schedule specific times for planning upcoming events\n\n\
Would you like me to help you set up any of these organizational systems?";

pub const SURPRISE_PLANNING: &str = "I'd love to help you plan a surprise! For Mom's upcoming birthday, based on what I know about her:\n\n\
• She loves gardening - maybe a new plant or garden tool?\n\
• She enjoys cooking - a cookbook or cooking class?\n\
• Consider organizing a family video call if family is far away\n\
• You could create a photo album of memories with her\n\n\
What type of surprise were you thinking about? I can help you plan the details!";

/// Generic replies used when no rule matches.
pub const FALLBACK_RESPONSES: &[&str] = &[
    "That's interesting! Can you tell me more about that?",
    "I'd be happy to help you with that. What specific aspect would you like to focus on?",
    "Based on your previous activities and preferences, I think I can provide some good suggestions. What are you looking for exactly?",
    "That sounds important to you. How can I best assist you with this?",
    "I'm here to help! Could you provide a bit more context so I can give you the most relevant advice?",
];
