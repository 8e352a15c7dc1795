//! Assessment assistant: templated explanations and a scripted FAQ engine.
//!
//! No model and no network. The engine is an ordered table of
//! (patterns, response) pairs evaluated first-match-wins, followed by a
//! broader keyword tier, followed by a fixed fallback. Responses may
//! template in values from the assessment under discussion.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{Assessment, RiskLevel};

type Responder = fn(Option<&Assessment>) -> String;

struct FaqEntry {
    patterns: &'static [&'static str],
    respond: Responder,
}

struct CompiledEntry {
    patterns: Vec<Regex>,
    respond: Responder,
}

static FAQ: OnceLock<Vec<CompiledEntry>> = OnceLock::new();

/// Response when no pattern and no keyword rule matches.
pub const DEFAULT_RESPONSE: &str = "I can help you understand your assessment results, \
    explain endometriosis risk factors, discuss symptoms, and provide information about \
    next steps. What would you like to know more about?";

fn capitalized(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Low",
        RiskLevel::Medium => "Medium",
        RiskLevel::High => "High",
    }
}

fn pct(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

/// Build the multi-line summary of an assessment shown by the assistant.
#[must_use]
pub fn build_result_explanation(assessment: &Assessment) -> String {
    let result = &assessment.result;

    let top_factors = result
        .factors
        .iter()
        .take(5)
        .map(|f| format!("{} ({}) — increases risk", f.feature, f.value))
        .collect::<Vec<_>>()
        .join("; ");

    let next_steps = result
        .recommendations
        .iter()
        .take(5)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ");

    let mut lines = vec![
        "Here's a quick explanation of your assessment:".to_string(),
        format!(
            "- Overall risk: {} ({}%)",
            capitalized(result.risk_level),
            pct(result.probability)
        ),
        format!("- Model confidence: {}%", pct(result.confidence)),
        format!(
            "- Predicted stage: {} (stage reflects extent of disease, not pain severity)",
            result.stage
        ),
    ];
    if !top_factors.is_empty() {
        lines.push(format!("- Top factors: {top_factors}"));
    }
    if !next_steps.is_empty() {
        lines.push(format!("- Next steps: {next_steps}"));
    }
    lines.push("This is not a diagnosis.".to_string());

    lines.join("\n")
}

/// Opening assistant message for a chat about an assessment.
#[must_use]
pub fn greeting(assessment: &Assessment) -> String {
    format!(
        "Hello! I'm here to help you understand your endometriosis risk assessment. \
         Your risk level is {} ({}% probability). Feel free to ask me any questions \
         about your results or endometriosis in general. Type 'summary' for a quick \
         explanation of your results.",
        assessment.result.risk_level.as_str(),
        pct(assessment.result.probability)
    )
}

fn results_meaning(assessment: Option<&Assessment>) -> String {
    let Some(assessment) = assessment else {
        return "Please provide your assessment details.".to_string();
    };
    let risk = assessment.result.risk_level;
    let meaning = match risk {
        RiskLevel::High => "You have several indicators that suggest endometriosis may be present",
        RiskLevel::Medium => "You have some indicators that suggest endometriosis could be present",
        RiskLevel::Low => {
            "Your indicators show lower likelihood, but symptoms should still be evaluated"
        }
    };
    let next_steps = assessment
        .result
        .recommendations
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Your results indicate a {} risk level ({}% probability) of endometriosis based on \
         your symptoms, medical history, and biomarkers.\n\nWhat this means:\n- {}\n\
         - This is a screening tool, not a diagnosis\n\
         - Clinical evaluation by a gynecologist is recommended\n\nNext steps: {}",
        risk.as_str(),
        pct(assessment.result.probability),
        meaning,
        next_steps
    )
}

fn not_a_diagnosis(assessment: Option<&Assessment>) -> String {
    let risk = assessment.map_or("unknown", |a| a.result.risk_level.as_str());
    format!(
        "No, this is not a diagnosis. This assessment indicates a {risk} risk based on your \
         symptoms and history, but only a healthcare provider can diagnose endometriosis.\n\n\
         Key points:\n\
         - Definitive diagnosis typically requires laparoscopy (minimally invasive surgery)\n\
         - Imaging like ultrasound or MRI can detect endometriomas and deep disease\n\
         - Clinical evaluation by a gynecologist specializing in endometriosis is essential\n\
         - Many people are managed based on symptoms even without surgical confirmation\n\n\
         Action: Schedule an appointment with a gynecologist to discuss your symptoms and \
         this assessment."
    )
}

fn accuracy(assessment: Option<&Assessment>) -> String {
    let conf = assessment.map_or(0, |a| pct(a.result.confidence));
    let reading = if conf > 80 {
        "High confidence suggests clear symptom patterns"
    } else if conf > 60 {
        "Moderate confidence suggests mixed indicators"
    } else {
        "Lower confidence suggests less clear patterns"
    };
    format!(
        "This assessment has a model confidence of {conf}%.\n\nAccuracy considerations:\n\
         - This tool uses a rule table based on clinical research and symptom patterns\n\
         - It's a screening tool, not a diagnostic test\n\
         - Accuracy varies based on symptom clarity and completeness of information\n\
         - {reading}\n\n\
         Important: Only clinical evaluation, imaging, and potentially laparoscopy can \
         provide definitive diagnosis. Use this as a guide for discussing with your doctor."
    )
}

fn stage_meaning(assessment: Option<&Assessment>) -> String {
    // Stage 0 reads as "unknown": there is no stage to explain
    let stage = match assessment {
        Some(a) if a.result.stage != 0 => a.result.stage.to_string(),
        _ => "unknown".to_string(),
    };
    format!(
        "Your predicted stage is {stage}.\n\nUnderstanding stages (I-IV):\n\
         - Stage I (Minimal): Small, isolated implants\n\
         - Stage II (Mild): More implants, slightly deeper\n\
         - Stage III (Moderate): Many implants, possible ovarian cysts\n\
         - Stage IV (Severe): Extensive implants, large cysts, dense adhesions\n\n\
         Critical to know:\n\
         - Stage does NOT correlate with pain severity\n\
         - Stage I can cause severe pain; Stage IV can be pain-free\n\
         - Staging reflects disease extent, not symptom intensity\n\
         - Treatment focuses on YOUR symptoms, not just the stage\n\n\
         Next step: Discuss symptom management options with a gynecologist regardless of \
         predicted stage."
    )
}

fn other_symptoms(_: Option<&Assessment>) -> String {
    "Yes, endometriosis can cause many symptoms beyond pelvic pain:\n\n\
     Common symptoms:\n\
     - Chronic pelvic pain and severe period cramps\n\
     - Pain during or after sex (dyspareunia)\n\
     - Back pain and leg pain (nerve involvement)\n\
     - Chronic fatigue (from inflammation and pain)\n\
     - Bloating and digestive issues\n\
     - Painful bowel movements or urination during periods\n\
     - Heavy bleeding or spotting\n\
     - Infertility or difficulty conceiving\n\n\
     Why this happens:\n\
     - Endometrial-like tissue grows outside the uterus\n\
     - Causes inflammation, scarring, and adhesions\n\
     - Can affect nerves, bowel, bladder, and other organs\n\
     - Systemic inflammation leads to fatigue\n\n\
     Important: Symptoms vary widely between individuals. Track your patterns and discuss \
     all symptoms with your doctor."
        .to_string()
}

fn symptom_fluctuation(_: Option<&Assessment>) -> String {
    "Yes, symptoms often fluctuate throughout your cycle and over time.\n\n\
     Common patterns:\n\
     - Symptoms typically worse during or around menstruation\n\
     - Pain may peak mid-cycle (ovulation) or just before period\n\
     - Some months are worse than others\n\
     - Stress, diet, and inflammation levels affect symptoms\n\
     - Disease progression can change symptom patterns\n\n\
     Why symptoms vary:\n\
     - Hormonal fluctuations drive endometrial tissue activity\n\
     - Inflammation levels change with cycle\n\
     - Scar tissue and adhesions evolve over time\n\
     - Lifestyle factors (sleep, stress, diet) impact pain perception\n\n\
     Helpful action: Track your symptoms with a diary or app to identify patterns and \
     triggers. This information is valuable for your doctor."
        .to_string()
}

fn chronic_pain(_: Option<&Assessment>) -> String {
    "Pain continuing after your period can indicate endometriosis involvement.\n\n\
     Why this happens:\n\
     - Endometrial-like tissue outside the uterus responds to hormones\n\
     - Inflammation persists even after bleeding stops\n\
     - Adhesions and scar tissue cause ongoing pain\n\
     - Deep infiltrating endometriosis affects surrounding organs\n\
     - Nerve sensitization creates chronic pain cycles\n\n\
     Types of ongoing pain:\n\
     - Chronic pelvic pain (>6 months)\n\
     - Pain during ovulation\n\
     - Pain with sex, exercise, or bowel movements\n\
     - Lower back or leg pain (nerve involvement)\n\n\
     Management:\n\
     - NSAIDs and pain management strategies\n\
     - Hormonal treatments to suppress endometriosis activity\n\
     - Pelvic floor physical therapy\n\
     - Discuss persistent pain with your gynecologist for treatment options"
        .to_string()
}

fn when_to_see_doctor(assessment: Option<&Assessment>) -> String {
    let risk = assessment.map_or(RiskLevel::Medium, |a| a.result.risk_level);
    let opening = match risk {
        RiskLevel::High => "Yes, you should see a gynecologist soon",
        RiskLevel::Medium => "Yes, scheduling a gynecologist appointment is recommended",
        RiskLevel::Low => "Consider seeing a gynecologist if symptoms persist",
    };
    format!(
        "{opening}.\n\nWhen to seek care:\n\
         - Severe period pain interfering with daily life\n\
         - Pain with sex, bowel movements, or urination\n\
         - Heavy bleeding or irregular cycles\n\
         - Difficulty conceiving after 6-12 months\n\
         - Any of your concerning symptoms\n\n\
         What to bring to appointment:\n\
         - This assessment and your symptom history\n\
         - Menstrual cycle tracking (dates, flow, pain levels)\n\
         - List of current medications and treatments tried\n\
         - Family history of endometriosis\n\
         - Questions about diagnosis and treatment options\n\n\
         Finding the right doctor: Look for a gynecologist with endometriosis experience \
         or consider a specialist in reproductive endocrinology or pelvic pain."
    )
}

fn which_specialist(_: Option<&Assessment>) -> String {
    "Recommended healthcare providers for endometriosis:\n\n\
     1. Gynecologist (First step)\n\
     - General gynecologists can diagnose and manage most cases\n\
     - Can prescribe medications and order imaging\n\
     - Refer to specialists if needed\n\n\
     2. Endometriosis Specialist\n\
     - Gynecologists with advanced training in endometriosis\n\
     - Skilled in excision surgery (gold standard treatment)\n\
     - Manage complex or severe cases\n\n\
     3. Reproductive Endocrinologist\n\
     - If fertility is a concern\n\
     - Specializes in hormonal treatments and assisted reproduction\n\n\
     4. Additional support:\n\
     - Pelvic floor physical therapist (pain management)\n\
     - Pain management specialist (chronic pain)\n\
     - Colorectal surgeon (for bowel involvement)\n\n\
     Finding a specialist: Look for endometriosis centers, search professional \
     organizations (like AAGL), or ask for referrals from your primary care doctor."
        .to_string()
}

fn diagnosis_process(_: Option<&Assessment>) -> String {
    "Endometriosis diagnosis typically involves:\n\n\
     1. Clinical Evaluation\n\
     - Detailed symptom history and pelvic exam\n\
     - Many cases managed based on symptoms alone\n\n\
     2. Imaging Studies\n\
     - Transvaginal ultrasound: Detects ovarian endometriomas (cysts)\n\
     - MRI: Better visualization of deep infiltrating endometriosis\n\
     - Note: Imaging can miss superficial implants\n\n\
     3. Laparoscopy (Definitive diagnosis)\n\
     - Minimally invasive surgery with camera\n\
     - Allows direct visualization of endometrial implants\n\
     - Tissue can be biopsied and removed during procedure\n\
     - Considered gold standard for diagnosis\n\n\
     4. Blood Tests (Supportive, not diagnostic)\n\
     - CA-125 may be elevated but not specific\n\
     - Inflammatory markers\n\n\
     Important: Many doctors start treatment based on symptoms without requiring surgery, \
     especially if imaging suggests endometriosis or symptoms are classic."
        .to_string()
}

fn imaging_or_surgery(_: Option<&Assessment>) -> String {
    "The approach depends on your symptoms and goals:\n\n\
     Start with imaging (Ultrasound/MRI):\n\
     - Non-invasive and often helpful\n\
     - Can detect endometriomas and deep disease\n\
     - Good first step before considering surgery\n\
     - Recommendation: Start with transvaginal ultrasound\n\n\
     Consider laparoscopy if:\n\
     - Imaging is inconclusive but symptoms are severe\n\
     - Pain is unmanaged by medications\n\
     - Fertility is a concern and other causes ruled out\n\
     - Imaging shows severe disease requiring treatment\n\
     - You want definitive diagnosis\n\n\
     Treatment-first approach:\n\
     - Many doctors prescribe hormonal treatments without surgery\n\
     - If treatments help, you may not need laparoscopy\n\
     - Surgery reserved for persistent symptoms or fertility issues\n\n\
     Discuss with your gynecologist: They'll recommend the best approach based on your \
     specific situation, symptom severity, and reproductive goals."
        .to_string()
}

fn natural_pain_management(_: Option<&Assessment>) -> String {
    "Natural pain management strategies for endometriosis:\n\n\
     1. Heat therapy\n\
     - Heating pads, hot water bottles, or warm baths\n\
     - Helps relax muscles and reduce cramping\n\n\
     2. Physical therapy\n\
     - Pelvic floor physical therapy (highly effective)\n\
     - Helps with muscle tension and pain\n\n\
     3. Exercise\n\
     - Gentle activities: yoga, walking, swimming\n\
     - Reduces inflammation and improves mood\n\
     - Avoid overexertion during flares\n\n\
     4. Stress management\n\
     - Meditation, mindfulness, deep breathing\n\
     - Stress worsens pain perception and inflammation\n\n\
     5. TENS units\n\
     - Transcutaneous electrical nerve stimulation\n\
     - Blocks pain signals\n\n\
     6. Supplements (consult doctor first)\n\
     - Omega-3s (anti-inflammatory)\n\
     - Magnesium (muscle relaxation)\n\
     - Turmeric/curcumin\n\n\
     Important: Natural methods work best alongside medical treatment, not as replacement. \
     Discuss all approaches with your doctor."
        .to_string()
}

fn diet_guidelines(_: Option<&Assessment>) -> String {
    "Diet guidelines for endometriosis:\n\n\
     Foods that may help (anti-inflammatory):\n\
     - Fruits & vegetables: Berries, leafy greens, cruciferous vegetables\n\
     - Omega-3 rich foods: Fatty fish, walnuts, flaxseeds\n\
     - Whole grains: Quinoa, brown rice, oats\n\
     - Legumes: Beans, lentils\n\
     - Healthy fats: Olive oil, avocado\n\
     - Anti-inflammatory spices: Turmeric, ginger\n\n\
     Foods to limit (may increase inflammation):\n\
     - Red meat and processed meats\n\
     - Refined sugars and processed foods\n\
     - Trans fats and fried foods\n\
     - Alcohol\n\
     - Excessive caffeine\n\
     - High-FODMAP foods if you have digestive issues\n\n\
     General principles:\n\
     - Eat whole, unprocessed foods\n\
     - Stay hydrated\n\
     - Consider food diary to identify triggers\n\
     - Some find gluten or dairy worsens symptoms\n\n\
     Note: Diet alone won't cure endometriosis, but it may help reduce inflammation and \
     improve symptoms. Work with a nutritionist familiar with endometriosis if possible."
        .to_string()
}

fn exercise_help(_: Option<&Assessment>) -> String {
    "Yes, exercise and yoga can help manage endometriosis symptoms!\n\n\
     Benefits of exercise:\n\
     - Reduces inflammation\n\
     - Releases endorphins (natural pain relief)\n\
     - Improves mood and reduces stress\n\
     - Helps regulate hormones\n\
     - Reduces estrogen levels\n\n\
     Best types of exercise:\n\n\
     1. Yoga (Highly recommended)\n\
     - Gentle stretching reduces pelvic tension\n\
     - Breathing exercises manage stress\n\
     - Restorative poses help during flares\n\
     - Focus on hip openers and gentle twists\n\n\
     2. Low-impact cardio\n\
     - Walking, swimming, cycling\n\
     - 20-30 minutes, 3-5 times per week\n\n\
     3. Pilates\n\
     - Strengthens core without high impact\n\
     - Improves pelvic floor function\n\n\
     Tips:\n\
     - Listen to your body and rest during flares\n\
     - Start slowly and build gradually\n\
     - Avoid high-intensity exercise during severe pain\n\
     - Focus on gentle movement and stretching\n\n\
     Pelvic floor yoga and physical therapy are especially helpful for \
     endometriosis-related pain."
        .to_string()
}

fn stress_impact(_: Option<&Assessment>) -> String {
    "Stress significantly impacts endometriosis symptoms:\n\n\
     How stress worsens symptoms:\n\
     - Increases inflammation and cortisol levels\n\
     - Lowers pain threshold (makes pain feel worse)\n\
     - Disrupts hormone balance\n\
     - Weakens immune function\n\
     - Causes muscle tension in pelvis\n\
     - May trigger symptom flares\n\n\
     The pain-stress cycle:\n\
     - Pain causes stress and anxiety\n\
     - Stress worsens pain perception\n\
     - Creates a difficult cycle to break\n\n\
     Stress management strategies:\n\n\
     1. Relaxation techniques\n\
     - Deep breathing exercises\n\
     - Progressive muscle relaxation\n\
     - Meditation and mindfulness apps\n\n\
     2. Lifestyle modifications\n\
     - Prioritize sleep (7-9 hours)\n\
     - Regular gentle exercise\n\
     - Time management to reduce overwhelm\n\n\
     3. Support\n\
     - Therapy or counseling\n\
     - Support groups (online or in-person)\n\
     - Talk to friends and family\n\n\
     4. Mind-body practices\n\
     - Yoga, tai chi\n\
     - Guided imagery\n\
     - Biofeedback\n\n\
     Important: Managing stress is a key part of comprehensive endometriosis treatment."
        .to_string()
}

fn heat_and_rest(_: Option<&Assessment>) -> String {
    "Yes! Heat therapy and rest are very effective for endometriosis pain.\n\n\
     Heat therapy benefits:\n\
     - Relaxes uterine and pelvic muscles\n\
     - Increases blood flow to the area\n\
     - Reduces cramping and spasms\n\
     - Provides immediate pain relief\n\
     - Safe and no side effects\n\n\
     How to use heat effectively:\n\
     - Heating pads: 20-30 minutes at a time\n\
     - Hot water bottles: Wrap in towel to prevent burns\n\
     - Warm baths: Add Epsom salts for extra relaxation\n\
     - Heated blankets: For overall comfort\n\
     - Note: Don't use excessive heat or fall asleep with heating pad\n\n\
     Rest and recovery:\n\
     - During flares: Rest is essential, not lazy\n\
     - Listen to your body: Pace activities\n\
     - Quality sleep: Helps with pain management and healing\n\
     - Gentle movement: Light stretching when resting\n\n\
     Combining approaches:\n\
     - Use heat + rest during acute pain\n\
     - Add gentle stretching when comfortable\n\
     - Take prescribed pain medication as needed\n\
     - Practice relaxation techniques\n\n\
     Remember: Chronic pain is exhausting. Rest is part of treatment, not avoidance."
        .to_string()
}

/// Ordered FAQ table; earlier entries win when several match.
const FAQ_ENTRIES: &[FaqEntry] = &[
    FaqEntry {
        patterns: &[
            r"(?i)what\s+(do|does)\s+my\s+results?\s+mean",
            r"(?i)interpret\s+my\s+results?",
            r"(?i)understand\s+my\s+results?",
            r"(?i)explain\s+my\s+results?",
            r"(?i)tell\s+me\s+about\s+my\s+results?",
            r"(?i)what\s+(is|are)\s+my\s+results?",
            r"(?i)summary\s+of\s+my\s+results?",
            r"(?i)results?\s+explanation",
        ],
        respond: results_meaning,
    },
    FaqEntry {
        patterns: &[
            r"(?i)does\s+this\s+mean\s+i\s+have\s+endometriosis",
            r"(?i)do\s+i\s+have\s+endometriosis",
            r"(?i)am\s+i\s+diagnosed",
        ],
        respond: not_a_diagnosis,
    },
    FaqEntry {
        patterns: &[
            r"(?i)how\s+accurate",
            r"(?i)is\s+this\s+reliable",
            r"(?i)can\s+i\s+trust",
            r"(?i)confidence",
        ],
        respond: accuracy,
    },
    FaqEntry {
        patterns: &[
            r"(?i)is\s+this\s+(mild|severe|moderate)",
            r"(?i)how\s+(bad|serious|severe)",
            r"(?i)stage\s+mean",
        ],
        respond: stage_meaning,
    },
    FaqEntry {
        patterns: &[
            r"(?i)can\s+endometriosis\s+cause\s+(back\s+pain|fatigue|bloating)",
            r"(?i)symptoms\s+like",
            r"(?i)other\s+symptoms",
        ],
        respond: other_symptoms,
    },
    FaqEntry {
        patterns: &[
            r"(?i)symptoms?\s+change",
            r"(?i)month\s+to\s+month",
            r"(?i)vary",
            r"(?i)fluctuate",
        ],
        respond: symptom_fluctuation,
    },
    FaqEntry {
        patterns: &[
            r"(?i)pain.*after.*period",
            r"(?i)pain.*between.*periods",
            r"(?i)chronic.*pain",
        ],
        respond: chronic_pain,
    },
    FaqEntry {
        patterns: &[
            r"(?i)should\s+i\s+see.*gynecologist",
            r"(?i)when.*see.*doctor",
            r"(?i)need.*specialist",
        ],
        respond: when_to_see_doctor,
    },
    FaqEntry {
        patterns: &[
            r"(?i)which.*doctor",
            r"(?i)what.*specialist",
            r"(?i)type.*doctor",
        ],
        respond: which_specialist,
    },
    FaqEntry {
        patterns: &[
            r"(?i)what.*tests",
            r"(?i)how.*diagnosed",
            r"(?i)confirm.*endometriosis",
            r"(?i)diagnosis.*process",
        ],
        respond: diagnosis_process,
    },
    FaqEntry {
        patterns: &[
            r"(?i)ultrasound.*laparoscopy",
            r"(?i)should.*i.*get",
            r"(?i)need.*surgery",
        ],
        respond: imaging_or_surgery,
    },
    FaqEntry {
        patterns: &[
            r"(?i)manage.*pain.*naturally",
            r"(?i)natural.*treatment",
            r"(?i)without.*medication",
            r"(?i)home.*remedies",
        ],
        respond: natural_pain_management,
    },
    FaqEntry {
        patterns: &[
            r"(?i)foods.*good.*bad",
            r"(?i)what.*eat",
            r"(?i)diet.*endometriosis",
        ],
        respond: diet_guidelines,
    },
    FaqEntry {
        patterns: &[
            r"(?i)exercise.*yoga.*help",
            r"(?i)physical.*activity",
            r"(?i)workout",
        ],
        respond: exercise_help,
    },
    FaqEntry {
        patterns: &[
            r"(?i)stress.*affect",
            r"(?i)stress.*symptoms",
            r"(?i)anxiety.*pain",
        ],
        respond: stress_impact,
    },
    FaqEntry {
        patterns: &[
            r"(?i)heat.*pads?.*help",
            r"(?i)rest.*help",
            r"(?i)heating.*pad",
        ],
        respond: heat_and_rest,
    },
];

fn faq() -> &'static [CompiledEntry] {
    FAQ.get_or_init(|| {
        FAQ_ENTRIES
            .iter()
            .map(|entry| CompiledEntry {
                patterns: entry
                    .patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("Valid regex"))
                    .collect(),
                respond: entry.respond,
            })
            .collect()
    })
}

/// Match a question against the FAQ table, first match wins.
///
/// Returns `None` when no entry matches.
#[must_use]
pub fn answer(question: &str, assessment: Option<&Assessment>) -> Option<String> {
    let normalized = question.trim().to_lowercase();

    for entry in faq() {
        if entry.patterns.iter().any(|p| p.is_match(&normalized)) {
            return Some((entry.respond)(assessment));
        }
    }

    None
}

fn keyword_answer(normalized: &str, assessment: Option<&Assessment>) -> Option<String> {
    let contains = |needle: &str| normalized.contains(needle);

    if contains("risk") && (contains("what") || contains("mean")) {
        let Some(a) = assessment else { return None };
        let meaning = match a.result.risk_level {
            RiskLevel::Low => {
                "you have a lower likelihood of endometriosis based on the factors assessed."
            }
            RiskLevel::Medium => {
                "you have some risk factors that suggest you should monitor your symptoms \
                 and consult with a healthcare provider."
            }
            RiskLevel::High => {
                "you have several risk factors that warrant medical consultation for proper \
                 diagnosis and treatment options."
            }
        };
        return Some(format!(
            "Your risk level is {} with a probability of {}%. This means {}",
            a.result.risk_level.as_str(),
            pct(a.result.probability),
            meaning
        ));
    }

    if contains("factor") || contains("contribute") {
        let Some(a) = assessment else { return None };
        let top_factors = a
            .result
            .factors
            .iter()
            .take(3)
            .map(|f| format!("{} (impact {})", f.feature, f.impact))
            .collect::<Vec<_>>()
            .join(", ");
        return Some(format!(
            "The main factors contributing to your assessment are: {top_factors}. These \
             were identified based on your responses about symptoms, medical history, and \
             biomarkers."
        ));
    }

    if contains("recommend") || contains("should i") || contains("next") {
        let Some(a) = assessment else { return None };
        let top = a
            .result
            .recommendations
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");
        return Some(format!(
            "Based on your assessment, I recommend: {top}. Would you like more details \
             about any specific recommendation?"
        ));
    }

    if contains("symptom") {
        return Some(
            "Endometriosis symptoms can include pelvic pain, painful periods, pain during \
             intercourse, heavy menstrual bleeding, and fertility issues. The severity and \
             combination of symptoms vary greatly between individuals. If you're \
             experiencing concerning symptoms, please consult a healthcare provider."
                .to_string(),
        );
    }

    if contains("treatment") || contains("cure") {
        return Some(
            "While there's no cure for endometriosis, treatments include pain medication, \
             hormone therapy, and in some cases, surgery. Treatment plans are individualized \
             based on symptoms, severity, and whether you're trying to conceive. A \
             gynecologist specializing in endometriosis can help determine the best approach \
             for your situation."
                .to_string(),
        );
    }

    if contains("confidence") || contains("accurate") {
        let Some(a) = assessment else { return None };
        return Some(format!(
            "The confidence level of your assessment is {}%. This tool analyzes multiple \
             factors, but it's designed for informational purposes only. Always consult \
             with a qualified healthcare provider for proper diagnosis and treatment.",
            pct(a.result.confidence)
        ));
    }

    if contains("what is endometriosis") || contains("endometriosis is") {
        return Some(
            "Endometriosis is a condition where tissue similar to the uterine lining grows \
             outside the uterus, commonly on ovaries, fallopian tubes, and pelvic tissues. \
             This can cause pain, inflammation, and fertility issues. It affects \
             approximately 10% of women of reproductive age."
                .to_string(),
        );
    }

    None
}

/// Full response pipeline: summary command, FAQ table, keyword tier, fallback.
#[must_use]
pub fn respond(question: &str, assessment: Option<&Assessment>) -> String {
    let normalized = question.trim().to_lowercase();

    if matches!(normalized.as_str(), "summary" | "summarize" | "explain") {
        if let Some(assessment) = assessment {
            return build_result_explanation(assessment);
        }
    }

    if let Some(response) = answer(question, assessment) {
        return response;
    }

    if let Some(response) = keyword_answer(&normalized, assessment) {
        return response;
    }

    DEFAULT_RESPONSE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{scoring, AssessmentRecord};

    fn high_risk_assessment() -> Assessment {
        let record = AssessmentRecord {
            age: 30,
            bmi: 23.88,
            cycle_length: 28,
            age_of_menarche: 12,
            dysmenorrhea_score: 8,
            pelvic_pain_score: 8,
            dyspareunia_score: 4,
            family_history: true,
            ca125_level: 40.0,
            crp_level: 5.0,
            mental_health_score: 3,
            ..Default::default()
        };
        Assessment::new(record.clone(), scoring::score(&record))
    }

    fn low_risk_assessment() -> Assessment {
        let record = AssessmentRecord {
            age: 20,
            bmi: 21.0,
            cycle_length: 28,
            age_of_menarche: 13,
            ..Default::default()
        };
        Assessment::new(record.clone(), scoring::score(&record))
    }

    #[test]
    fn test_explanation_contains_key_numbers() {
        let assessment = high_risk_assessment();
        let explanation = build_result_explanation(&assessment);

        assert!(explanation.contains("Overall risk: High (90%)"));
        assert!(explanation.contains("Model confidence: 87%"));
        assert!(explanation.contains("Predicted stage: 4"));
        assert!(explanation.contains("Pain Symptoms (High (20/30))"));
        assert!(explanation.ends_with("This is not a diagnosis."));
    }

    #[test]
    fn test_explanation_omits_empty_sections() {
        let assessment = low_risk_assessment();
        let explanation = build_result_explanation(&assessment);

        // No fired factors: the line disappears, recommendations stay
        assert!(!explanation.contains("Top factors:"));
        assert!(explanation.contains("Next steps:"));
    }

    #[test]
    fn test_faq_results_meaning() {
        let assessment = high_risk_assessment();
        let response =
            answer("What do my results mean?", Some(&assessment)).expect("Should match");
        assert!(response.contains("high risk level (90% probability)"));
        assert!(response.contains("screening tool"));
    }

    #[test]
    fn test_faq_without_assessment() {
        let response = answer("explain my results", None).expect("Should match");
        assert_eq!(response, "Please provide your assessment details.");
    }

    #[test]
    fn test_faq_first_match_wins() {
        // Matches both the stage entry and the fluctuation entry; the stage
        // entry comes first in the table
        let assessment = high_risk_assessment();
        let response = answer("what does my stage mean, does it vary?", Some(&assessment))
            .expect("Should match");
        assert!(response.contains("Understanding stages"));
    }

    #[test]
    fn test_faq_stage_zero_reads_unknown() {
        let assessment = low_risk_assessment();
        let response = answer("what does the stage mean?", Some(&assessment))
            .expect("Should match");
        assert!(response.contains("Your predicted stage is unknown."));
    }

    #[test]
    fn test_faq_no_match_returns_none() {
        assert!(answer("tell me about the weather", None).is_none());
    }

    #[test]
    fn test_keyword_tier_treatment() {
        let response = respond("is there a treatment?", None);
        assert!(response.contains("no cure for endometriosis"));
    }

    #[test]
    fn test_keyword_tier_factors() {
        let assessment = high_risk_assessment();
        let response = respond("which factor mattered most?", Some(&assessment));
        assert!(response.contains("Pain Symptoms (impact 30)"));
    }

    #[test]
    fn test_respond_falls_back_to_default() {
        assert_eq!(respond("xyzzy", None), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_summary_command() {
        let assessment = high_risk_assessment();
        let response = respond("summary", Some(&assessment));
        assert!(response.starts_with("Here's a quick explanation"));
    }

    #[test]
    fn test_greeting_mentions_risk() {
        let assessment = high_risk_assessment();
        let greeting = greeting(&assessment);
        assert!(greeting.contains("high (90% probability)"));
    }
}
