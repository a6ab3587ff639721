use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

const HTML_TAGS: &str = "html,body,base,head,link,meta,style,title,address,article,aside,footer,\
header,hgroup,h1,h2,h3,h4,h5,h6,nav,section,div,dd,dl,dt,figcaption,figure,picture,hr,img,li,main,\
ol,p,pre,ul,a,b,abbr,bdi,bdo,br,cite,code,data,dfn,em,i,kbd,mark,q,rp,rt,ruby,s,samp,small,span,\
strong,sub,sup,time,u,var,wbr,area,audio,map,track,video,embed,object,param,source,canvas,script,\
noscript,del,ins,caption,col,colgroup,table,thead,tbody,td,th,tr,button,datalist,fieldset,form,\
input,label,legend,meter,optgroup,option,output,progress,select,textarea,details,dialog,menu,\
summary,template,blockquote,iframe,tfoot";

const SVG_TAGS: &str = "svg,animate,animateMotion,animateTransform,circle,clipPath,color-profile,\
defs,desc,discard,ellipse,feBlend,feColorMatrix,feComponentTransfer,feComposite,feConvolveMatrix,\
feDiffuseLighting,feDisplacementMap,feDistantLight,feDropShadow,feFlood,feFuncA,feFuncB,feFuncG,\
feFuncR,feGaussianBlur,feImage,feMerge,feMergeNode,feMorphology,feOffset,fePointLight,\
feSpecularLighting,feSpotLight,feTile,feTurbulence,filter,foreignObject,g,hatch,hatchpath,image,\
line,linearGradient,marker,mask,mesh,meshgradient,meshpatch,meshrow,metadata,mpath,path,pattern,\
polygon,polyline,radialGradient,rect,set,solidcolor,stop,switch,symbol,text,textPath,title,tspan,\
unknown,use,view";

lazy_static! {
    static ref KNOWN_TAGS: HashSet<&'static str> =
        HTML_TAGS.split(',').chain(SVG_TAGS.split(',')).collect();
    static ref FRAGMENT_LIKE_REGEX: Regex = Regex::new(r"^_?Fragment\d*$").unwrap();
}

pub const FRAGMENT: &str = "Fragment";
pub const KEEP_ALIVE: &str = "KeepAlive";

/// Built-in HTML or SVG element.
pub fn is_intrinsic_tag(name: &str) -> bool {
    KNOWN_TAGS.contains(name)
}

/// Tags whose children stay a plain array instead of a slot object.
pub fn is_slotless_tag(name: &str) -> bool {
    FRAGMENT_LIKE_REGEX.is_match(name) || name == KEEP_ALIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_and_svg_vocabularies() {
        assert!(is_intrinsic_tag("div"));
        assert!(is_intrinsic_tag("textarea"));
        assert!(is_intrinsic_tag("feGaussianBlur"));
        assert!(!is_intrinsic_tag("Div"));
        assert!(!is_intrinsic_tag("my-element"));
    }

    #[test]
    fn fragment_markers() {
        assert!(is_slotless_tag("Fragment"));
        assert!(is_slotless_tag("_Fragment2"));
        assert!(is_slotless_tag("KeepAlive"));
        assert!(!is_slotless_tag("FragmentList"));
    }
}
